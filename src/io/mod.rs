//! Input/output helpers.
//!
//! - point ingest from text (`ingest`)
//! - per-point result export (CSV) (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;
