//! Asynchronous fit requests across an execution boundary.
//!
//! - `wire`: flat numeric message codec
//! - `executor`: contexts that host the engine (worker thread, inline)
//! - `dispatcher`: id assignment, pending table, response routing

pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod wire;

pub use dispatcher::*;
pub use error::*;
pub use executor::*;
pub use wire::*;
