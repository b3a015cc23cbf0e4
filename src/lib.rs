//! `bezier-fit` library crate.
//!
//! Fits cubic Bézier timing curves (endpoints fixed at `(0,0)` and `(1,1)`) to
//! sample points, and dispatches fit requests to a background worker.
//!
//! The binary (`bezierfit`) is a thin wrapper around this library so that core
//! logic is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod data;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
