//! Cubic Bernstein basis polynomials.
//!
//! The basis functions are:
//!
//! - `B0(t) = (1 - t)^3`
//! - `B1(t) = 3 t (1 - t)^2`
//! - `B2(t) = 3 t^2 (1 - t)`
//! - `B3(t) = t^3`
//!
//! They are non-negative on `[0, 1]` and sum to one, so a cubic Bézier point is a
//! convex combination of its four control points.

/// All four basis weights at `t`, in order `[B0, B1, B2, B3]`.
pub fn bernstein(t: f64) -> [f64; 4] {
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let t2 = t * t;
    [mt2 * mt, 3.0 * mt2 * t, 3.0 * mt * t2, t2 * t]
}

/// First derivatives of the basis weights at `t`.
pub fn bernstein_d1(t: f64) -> [f64; 4] {
    let mt = 1.0 - t;
    [
        -3.0 * mt * mt,
        3.0 * mt * mt - 6.0 * t * mt,
        6.0 * t * mt - 3.0 * t * t,
        3.0 * t * t,
    ]
}

/// Second derivatives of the basis weights at `t`.
pub fn bernstein_d2(t: f64) -> [f64; 4] {
    let mt = 1.0 - t;
    [6.0 * mt, 6.0 * t - 12.0 * mt, 6.0 * mt - 12.0 * t, 6.0 * t]
}
