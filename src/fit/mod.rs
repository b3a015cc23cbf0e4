//! Curve fitting engine.
//!
//! Responsibilities:
//!
//! - assign curve parameters to samples (chord length, foot point)
//! - solve for the two free control points in the least-squares sense
//! - refine by re-parameterisation and fall back to the straight line when the
//!   samples carry no usable information

pub mod fitter;
pub mod parameterize;

pub use fitter::*;
pub use parameterize::*;
