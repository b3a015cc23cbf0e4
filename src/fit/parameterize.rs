//! Curve parameters for sample points.
//!
//! Two ways of deciding which `t` a sample corresponds to:
//!
//! - chord length: proportional to the distance travelled along the sample
//!   polyline, used for the first solve
//! - foot point: the closest point on an already fitted curve, used to refine

use crate::domain::{CubicBezier, Point};

/// Steps in the coarse scan that seeds the Newton search.
const SCAN_STEPS: usize = 16;

/// Newton iterations on the distance derivative.
const NEWTON_ITERATIONS: usize = 8;

/// Chord-length parameters: `t_0 = 0`, `t_{n-1} = 1`, and each step proportional
/// to the Euclidean distance between consecutive samples.
///
/// Returns `None` when the polyline has no usable length (fewer than two points,
/// all points coincident, or non-finite coordinates).
pub fn chord_length_params(points: &[Point]) -> Option<Vec<f64>> {
    if points.len() < 2 {
        return None;
    }

    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    cumulative.push(0.0);
    for pair in points.windows(2) {
        total += pair[0].distance(&pair[1]);
        cumulative.push(total);
    }

    if !(total.is_finite() && total > 0.0) {
        return None;
    }

    let mut params: Vec<f64> = cumulative.into_iter().map(|d| d / total).collect();
    if let Some(last) = params.last_mut() {
        *last = 1.0;
    }
    Some(params)
}

/// Parameter of the point on `curve` closest to `target`.
///
/// `hint` is the previous estimate; it competes with a coarse scan of `[0, 1]`
/// and the winner is polished by Newton's method on `(C(t) - p) · C'(t) = 0`.
/// The result never has a larger distance than `hint`.
pub fn foot_point(curve: &CubicBezier, target: &Point, hint: f64) -> f64 {
    let dist2 = |t: f64| {
        let p = curve.eval(t);
        let dx = p.x - target.x;
        let dy = p.y - target.y;
        dx * dx + dy * dy
    };

    let hint = if hint.is_finite() { hint.clamp(0.0, 1.0) } else { 0.0 };
    let mut best_t = hint;
    let mut best_d = dist2(hint);
    for i in 0..=SCAN_STEPS {
        let t = i as f64 / SCAN_STEPS as f64;
        let d = dist2(t);
        if d < best_d {
            best_t = t;
            best_d = d;
        }
    }

    let mut t = best_t;
    for _ in 0..NEWTON_ITERATIONS {
        let p = curve.eval(t);
        let d1 = curve.derivative(t);
        let d2 = curve.second_derivative(t);
        let ex = p.x - target.x;
        let ey = p.y - target.y;

        let f = ex * d1.x + ey * d1.y;
        let df = d1.x * d1.x + d1.y * d1.y + ex * d2.x + ey * d2.y;
        if !(df.is_finite() && df > 0.0) {
            break;
        }

        let next = (t - f / df).clamp(0.0, 1.0);
        if (next - t).abs() < 1e-12 {
            t = next;
            break;
        }
        t = next;
    }

    if dist2(t) <= best_d { t } else { best_t }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ControlPoints;

    #[test]
    fn chord_params_are_proportional_to_distance() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(0.3, 0.0),
            Point::new(0.3, 0.1),
        ];
        let params = chord_length_params(&points).unwrap();
        assert_eq!(params[0], 0.0);
        assert!((params[1] - 0.75).abs() < 1e-12);
        assert_eq!(params[2], 1.0);
    }

    #[test]
    fn chord_params_need_length() {
        assert!(chord_length_params(&[]).is_none());
        assert!(chord_length_params(&[Point::new(0.5, 0.5)]).is_none());
        let same = [Point::new(0.2, 0.4); 3];
        assert!(chord_length_params(&same).is_none());
        let nan = [Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
        assert!(chord_length_params(&nan).is_none());
    }

    #[test]
    fn foot_point_recovers_parameter_of_on_curve_point() {
        let curve = ControlPoints::new(Point::new(0.1, 0.8), Point::new(0.6, 0.1)).to_curve();
        for &t in &[0.05, 0.3, 0.5, 0.77, 0.95] {
            let p = curve.eval(t);
            let found = foot_point(&curve, &p, 0.5);
            assert!(curve.eval(found).distance(&p) < 1e-9, "t={t} found={found}");
        }
    }

    #[test]
    fn foot_point_on_diagonal_is_orthogonal_projection() {
        let curve = ControlPoints::IDENTITY.to_curve();
        let t = foot_point(&curve, &Point::new(0.2, 0.6), 0.0);
        assert!((t - 0.4).abs() < 1e-9);
    }
}
