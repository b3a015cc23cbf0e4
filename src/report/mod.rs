//! Reporting utilities: per-point residuals, quality figures, formatted output.
//!
//! Everything here works from control points alone, so it applies equally to a
//! result that came back from the fitting worker or from a curve JSON file.

pub mod format;

pub use format::*;

use crate::domain::{ControlPoints, FitQuality, Point, PointResidual};
use crate::fit::{chord_length_params, foot_point};

/// Where the curve defined by `cp` comes closest to each sample.
///
/// Each sample's curve parameter is its foot point, seeded with its
/// chord-length parameter.
pub fn compute_residuals(points: &[Point], cp: &ControlPoints) -> Vec<PointResidual> {
    let curve = cp.to_curve();
    let hints = chord_length_params(points).unwrap_or_else(|| vec![0.5; points.len()]);
    points
        .iter()
        .zip(hints)
        .map(|(p, hint)| {
            let t = foot_point(&curve, p, hint);
            let fitted = curve.eval(t);
            PointResidual {
                point: *p,
                t,
                fitted,
                distance: fitted.distance(p),
                timing_residual: curve.y_for_x(p.x) - p.y,
            }
        })
        .collect()
}

/// Summarise residuals for reports and the curve JSON.
pub fn fit_quality(cp: &ControlPoints, residuals: &[PointResidual]) -> FitQuality {
    let n = residuals.len();
    let max_error = residuals.iter().map(|r| r.distance).fold(0.0_f64, f64::max);
    let rms_error = if n == 0 {
        0.0
    } else {
        (residuals.iter().map(|r| r.distance * r.distance).sum::<f64>() / n as f64).sqrt()
    };
    FitQuality {
        n,
        max_error,
        rms_error,
        timing_sse: residuals.iter().map(|r| r.timing_residual * r.timing_residual).sum(),
        degenerate: *cp == ControlPoints::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residuals_measure_distance_to_the_curve() {
        // The identity curve is the diagonal with x(t) = t.
        let points = vec![Point::new(0.2, 0.4), Point::new(0.5, 0.5)];
        let residuals = compute_residuals(&points, &ControlPoints::IDENTITY);

        assert_eq!(residuals.len(), 2);
        assert_eq!(residuals[0].point, points[0]);
        assert!((residuals[0].t - 0.3).abs() < 1e-9, "t={}", residuals[0].t);
        assert!((residuals[0].distance - 0.2 / 2.0_f64.sqrt()).abs() < 1e-9);
        assert!((residuals[0].timing_residual + 0.2).abs() < 1e-6);
        assert!(residuals[1].distance < 1e-9);
    }

    #[test]
    fn samples_on_the_curve_have_no_error() {
        let cp = ControlPoints::new(Point::new(0.42, 0.0), Point::new(0.58, 1.0));
        let curve = cp.to_curve();
        let points: Vec<Point> = [0.1, 0.35, 0.6, 0.9].iter().map(|&t| curve.eval(t)).collect();

        let residuals = compute_residuals(&points, &cp);
        let q = fit_quality(&cp, &residuals);
        assert_eq!(q.n, 4);
        assert!(q.max_error < 1e-6, "max_error={}", q.max_error);
        assert!(q.rms_error <= q.max_error);
        assert!(q.timing_sse < 1e-10);
        assert!(!q.degenerate);
    }

    #[test]
    fn quality_of_empty_input() {
        let q = fit_quality(&ControlPoints::IDENTITY, &compute_residuals(&[], &ControlPoints::IDENTITY));
        assert_eq!(q.n, 0);
        assert_eq!(q.max_error, 0.0);
        assert_eq!(q.timing_sse, 0.0);
        assert!(q.degenerate);
    }
}
