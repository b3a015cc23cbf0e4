//! Small least squares solvers.
//!
//! The fitter only ever needs two-unknown problems:
//!
//! ```text
//! minimize Σ (r_i - a_i·x)^2,   x ∈ R^2
//! ```
//!
//! Implementation choices:
//! - The general case goes through the 2×2 normal equations directly. The matrix
//!   is shared by the x and y axes, so it is factorised once and applied to both
//!   right-hand sides.
//! - Rank-deficient problems (a single sample) are solved with SVD, which yields
//!   the minimum-norm least-squares solution instead of failing.

use nalgebra::{DMatrix, DVector, Matrix2, Vector2};

/// Solve a least squares problem using SVD.
///
/// Singular values below `tol` are treated as zero, so rank-deficient systems
/// return the minimum-norm solution. Returns `None` if the result is not finite.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>, tol: f64) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);
    let beta = svd.solve(y, tol).ok()?;
    if beta.iter().all(|v| v.is_finite()) {
        Some(beta)
    } else {
        None
    }
}

/// Solve `normal * [x_sol, y_sol] = [rhs_x, rhs_y]` for a symmetric 2×2 `normal`.
///
/// Returns `None` when `|det| <= eps * c11 * c22` (relative test, so uniformly
/// scaling every sample weight does not change the verdict).
pub fn solve_normal_2x2(
    normal: &Matrix2<f64>,
    rhs_x: &Vector2<f64>,
    rhs_y: &Vector2<f64>,
    eps: f64,
) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let scale = (normal[(0, 0)] * normal[(1, 1)]).abs();
    let det = normal.determinant();
    if !det.is_finite() || scale <= f64::MIN_POSITIVE || det.abs() <= eps * scale {
        return None;
    }

    let inv = normal.try_inverse()?;
    let sx = inv * rhs_x;
    let sy = inv * rhs_y;
    if sx.iter().chain(sy.iter()).all(|v| v.is_finite()) {
        Some((sx, sy))
    } else {
        None
    }
}
