//! Cubic Bézier evaluation.
//!
//! The fitter relies on three primitive operations:
//! - evaluate the curve point at a parameter `t`
//! - evaluate first/second derivatives (for foot-point search)
//! - read the curve as a timing function `y(x)` (for diagnostics and `eval`)

use crate::domain::{CubicBezier, Point};
use crate::math::{bernstein, bernstein_d1, bernstein_d2};

/// Bisection steps used by [`CubicBezier::y_for_x`].
const EVAL_ITERATIONS: usize = 30;

fn blend(w: [f64; 4], c: &CubicBezier) -> Point {
    Point::new(
        w[0] * c.p0.x + w[1] * c.p1.x + w[2] * c.p2.x + w[3] * c.p3.x,
        w[0] * c.p0.y + w[1] * c.p1.y + w[2] * c.p2.y + w[3] * c.p3.y,
    )
}

impl CubicBezier {
    /// Point on the curve at `t`.
    pub fn eval(&self, t: f64) -> Point {
        blend(bernstein(t), self)
    }

    /// Velocity `dC/dt` at `t`.
    pub fn derivative(&self, t: f64) -> Point {
        blend(bernstein_d1(t), self)
    }

    /// Acceleration `d²C/dt²` at `t`.
    pub fn second_derivative(&self, t: f64) -> Point {
        blend(bernstein_d2(t), self)
    }

    /// Approximate `y` for a given `x` treating the curve as a timing function.
    ///
    /// `x(t)` is assumed monotone on `[0, 1]` (true when both control point
    /// x-coordinates lie in `[0, 1]`). Bisection gives a precision of about
    /// `2^-30` in `t`.
    pub fn y_for_x(&self, x: f64) -> f64 {
        let mut lo = 0.0_f64;
        let mut hi = 1.0_f64;

        for _ in 0..EVAL_ITERATIONS {
            let mid = (lo + hi) * 0.5;
            let x_mid = self.eval(mid).x;
            if x_mid < x {
                lo = mid;
            } else if x_mid > x {
                hi = mid;
            } else {
                lo = mid;
                hi = mid;
                break;
            }
        }

        self.eval((lo + hi) * 0.5).y
    }

    /// `n` evenly spaced (in `t`) points along the curve, endpoints included.
    pub fn sample(&self, n: usize) -> Vec<Point> {
        let n = n.max(2);
        (0..n)
            .map(|i| self.eval(i as f64 / (n as f64 - 1.0)))
            .collect()
    }
}

/// `Σ (y(x_i) - y_i)²`: the squared error of `points` against the curve read
/// as a timing function.
pub fn timing_sse(points: &[Point], curve: &CubicBezier) -> f64 {
    points
        .iter()
        .map(|p| {
            let r = curve.y_for_x(p.x) - p.y;
            r * r
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ControlPoints;

    #[test]
    fn eval_hits_fixed_endpoints() {
        let curve = ControlPoints::new(Point::new(0.1, 0.9), Point::new(0.4, -0.2)).to_curve();
        assert_eq!(curve.eval(0.0), Point::new(0.0, 0.0));
        assert_eq!(curve.eval(1.0), Point::new(1.0, 1.0));
    }

    #[test]
    fn identity_curve_is_the_diagonal() {
        let curve = ControlPoints::IDENTITY.to_curve();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let p = curve.eval(t);
            assert!((p.x - t).abs() < 1e-12 && (p.y - t).abs() < 1e-12);
            assert!((curve.y_for_x(t) - t).abs() < 1e-6);
        }
    }

    #[test]
    fn y_for_x_inverts_x_of_t() {
        let curve = ControlPoints::new(Point::new(0.25, 0.1), Point::new(0.25, 1.0)).to_curve();
        for &t in &[0.1, 0.3, 0.6, 0.85] {
            let p = curve.eval(t);
            assert!((curve.y_for_x(p.x) - p.y).abs() < 1e-6, "t={t}");
        }
    }

    #[test]
    fn timing_sse_is_zero_on_the_curve() {
        let curve = ControlPoints::new(Point::new(0.42, 0.0), Point::new(0.58, 1.0)).to_curve();
        let samples = curve.sample(9);
        assert!(timing_sse(&samples, &curve) < 1e-10);
    }
}
