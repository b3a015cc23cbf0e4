//! Least-squares fitting of a timing curve to sample points.
//!
//! The curve is `C(t) = B0 P0 + B1 P1 + B2 P2 + B3 P3` with `P0 = (0,0)` and
//! `P3 = (1,1)` fixed. Given a parameter `t_i` for every sample `p_i`, the
//! residual is linear in the two free control points:
//!
//! ```text
//! r_i = p_i - B0(t_i) P0 - B3(t_i) P3
//! minimize Σ ‖ B1(t_i) P1 + B2(t_i) P2 - r_i ‖²
//! ```
//!
//! which separates into one 2×2 normal-equation solve per axis, both sharing the
//! same matrix. The pipeline is:
//!
//! 1. chord-length parameters
//! 2. linear solve (straight-line fallback if the system is near-singular)
//! 3. optional refinement: re-parameterise by foot point and re-solve, until the
//!    worst sample distance stops improving by more than the tolerance
//!
//! Everything is deterministic: the same input sequence always produces the same
//! bits.

use nalgebra::{DMatrix, DVector, Matrix2, Vector2};

use crate::domain::{ControlPoints, P0, P3, Point};
use crate::fit::{chord_length_params, foot_point};
use crate::math::{bernstein, solve_least_squares, solve_normal_2x2};

/// Relative singular-value cut-off for the symmetric single-sample solve.
const SYMMETRIC_RANK_TOL: f64 = 1e-9;

/// Straight diagonal curve the single-sample fit starts from.
const MIRROR_BASELINE: ControlPoints = ControlPoints::new(Point::new(0.5, 0.5), Point::new(0.5, 0.5));

/// Options that affect how the curve is fitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Maximum number of foot-point refinement passes. `0` disables refinement.
    pub refine_iterations: usize,
    /// Stop refining once a pass improves the worst-sample distance by less
    /// than this (unit-square units).
    pub refine_tolerance: f64,
    /// Relative determinant threshold below which the normal equations are
    /// treated as singular.
    pub singular_epsilon: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            refine_iterations: 4,
            refine_tolerance: 1e-4,
            singular_epsilon: 1e-12,
        }
    }
}

/// Fitted control points plus diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFit {
    pub control_points: ControlPoints,
    /// Curve parameter matched to each sample (same order as the input).
    pub params: Vec<f64>,
    pub max_error: f64,
    pub rms_error: f64,
    /// Accepted refinement passes.
    pub iterations: usize,
    /// True when the straight-line fallback was returned.
    pub degenerate: bool,
}

impl CurveFit {
    fn new(points: &[Point], control_points: ControlPoints, params: Vec<f64>, degenerate: bool) -> Self {
        let (max_error, rms_error) = sample_errors(points, &control_points, &params);
        Self {
            control_points,
            params,
            max_error,
            rms_error,
            iterations: 0,
            degenerate,
        }
    }

    fn straight_line(points: &[Point], params: Vec<f64>) -> Self {
        Self::new(points, ControlPoints::IDENTITY, params, true)
    }
}

/// Fit with default options and return only the control points.
pub fn fit(points: &[Point]) -> ControlPoints {
    fit_with_options(points, &FitOptions::default()).control_points
}

/// Fit the two free control points to `points`.
///
/// Never fails: an empty input, non-finite coordinates, a near-singular system,
/// or a non-finite result all produce the straight-line control points
/// `(1/3,1/3), (2/3,2/3)`.
pub fn fit_with_options(points: &[Point], opts: &FitOptions) -> CurveFit {
    if points.iter().any(|p| !p.is_finite()) {
        return CurveFit::straight_line(points, vec![0.5; points.len()]);
    }

    let fitted = match points {
        [] => CurveFit::straight_line(points, Vec::new()),
        [single] => fit_symmetric(points, *single),
        [first, ..] => match chord_length_params(points) {
            Some(params) => fit_general(points, params, opts),
            // Zero-length polyline: every sample sits on the first one.
            None => fit_symmetric(points, *first),
        },
    };

    if fitted.control_points.is_finite() {
        fitted
    } else {
        CurveFit::straight_line(points, vec![0.5; points.len()])
    }
}

fn fit_general(points: &[Point], params: Vec<f64>, opts: &FitOptions) -> CurveFit {
    let mut best = match solve_control_points(points, &params, opts.singular_epsilon) {
        Some(cp) => CurveFit::new(points, cp, params, false),
        None => CurveFit::straight_line(points, params),
    };

    for _ in 0..opts.refine_iterations {
        let curve = best.control_points.to_curve();
        let reparam: Vec<f64> = points
            .iter()
            .zip(best.params.iter())
            .map(|(p, &t)| foot_point(&curve, p, t))
            .collect();

        let Some(cp) = solve_control_points(points, &reparam, opts.singular_epsilon) else {
            break;
        };
        let candidate = CurveFit::new(points, cp, reparam, false);

        // Foot points never move a sample away from the old curve and the solve
        // minimises the squared sum for those parameters, so the RMS error can
        // only drop; anything else is rounding noise and ends the loop.
        if !(candidate.rms_error < best.rms_error) {
            break;
        }
        let improvement = best.max_error - candidate.max_error;
        let iterations = best.iterations + 1;
        best = CurveFit { iterations, ..candidate };
        if improvement < opts.refine_tolerance {
            break;
        }
    }

    best
}

/// Solve the shared 2×2 normal equations for fixed parameters.
fn solve_control_points(points: &[Point], params: &[f64], eps: f64) -> Option<ControlPoints> {
    let mut normal = Matrix2::<f64>::zeros();
    let mut rhs_x = Vector2::<f64>::zeros();
    let mut rhs_y = Vector2::<f64>::zeros();

    for (p, &t) in points.iter().zip(params.iter()) {
        let [b0, b1, b2, b3] = bernstein(t);
        let rx = p.x - b0 * P0.x - b3 * P3.x;
        let ry = p.y - b0 * P0.y - b3 * P3.y;

        normal[(0, 0)] += b1 * b1;
        normal[(0, 1)] += b1 * b2;
        normal[(1, 1)] += b2 * b2;
        rhs_x += Vector2::new(b1 * rx, b2 * rx);
        rhs_y += Vector2::new(b1 * ry, b2 * ry);
    }
    normal[(1, 0)] = normal[(0, 1)];

    let (sx, sy) = solve_normal_2x2(&normal, &rhs_x, &rhs_y, eps)?;
    Some(ControlPoints::new(Point::new(sx[0], sy[0]), Point::new(sx[1], sy[1])))
}

/// Fit control points mirrored across `y = x` (`P2 = (P1.y, P1.x)`) to one sample.
///
/// With `P1 = (1/2 + a, 1/2 + b)` and `P2 = (1/2 + b, 1/2 + a)` the curve at `t`
/// is the baseline point plus `(B1 a + B2 b, B1 b + B2 a)`, leaving two unknowns.
/// The baseline `P1 = P2 = (1/2, 1/2)` runs straight along the diagonal. The
/// sample is matched at its projection onto the chord; the minimum-norm solution
/// keeps the control points as close to the baseline as the sample allows, so a
/// sample on the diagonal yields a straight diagonal curve.
fn fit_symmetric(points: &[Point], anchor: Point) -> CurveFit {
    let t = chord_projection(&anchor);
    let [_, b1, b2, _] = bernstein(t);
    let base = MIRROR_BASELINE.to_curve().eval(t);

    let design = DMatrix::from_row_slice(2, 2, &[b1, b2, b2, b1]);
    let rhs = DVector::from_row_slice(&[anchor.x - base.x, anchor.y - base.y]);
    let tol = SYMMETRIC_RANK_TOL * (b1 + b2);

    let params = vec![t; points.len()];
    match solve_least_squares(&design, &rhs, tol) {
        Some(ab) => {
            let (a, b) = (ab[0], ab[1]);
            let c = MIRROR_BASELINE.p1;
            let cp = ControlPoints::new(Point::new(c.x + a, c.y + b), Point::new(c.x + b, c.y + a));
            CurveFit::new(points, cp, params, false)
        }
        None => CurveFit::straight_line(points, params),
    }
}

/// Parameter of the orthogonal projection of `p` onto the chord `P0 -> P3`, or
/// `0.5` when that lands on (or beyond) an endpoint.
fn chord_projection(p: &Point) -> f64 {
    let t = (p.x + p.y) / 2.0;
    if t > 0.0 && t < 1.0 { t } else { 0.5 }
}

fn sample_errors(points: &[Point], cp: &ControlPoints, params: &[f64]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let curve = cp.to_curve();
    let mut max = 0.0_f64;
    let mut sum_sq = 0.0;
    for (p, &t) in points.iter().zip(params.iter()) {
        let d = curve.eval(t).distance(p);
        max = max.max(d);
        sum_sq += d * d;
    }
    (max, (sum_sq / points.len() as f64).sqrt())
}
