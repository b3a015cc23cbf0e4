//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - geometry (`Point`, `ControlPoints`, `CubicBezier`)
//! - the request/response pair exchanged with the fitting worker
//! - fit outputs (`FitQuality`, `CurveFile`, `PointResidual`) and run configuration

pub mod types;

pub use types::*;
