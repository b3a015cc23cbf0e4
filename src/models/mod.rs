//! Curve model evaluation.
//!
//! Evaluation lives here as small, pure functions so that fitting and
//! reporting code can stay agnostic of the basis details.

pub mod bezier;

pub use bezier::*;
