//! Mathematical utilities: Bernstein basis functions and small least squares.

pub mod basis;
pub mod ols;

pub use basis::*;
pub use ols::*;
