use thiserror::Error;

/// Failures at the worker boundary.
///
/// None of these reach a `submit` caller: the dispatcher logs and discards
/// malformed traffic. They surface only from the codec and from worker start-up.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("empty message")]
    EmptyMessage,

    #[error("invalid request id: {0}")]
    InvalidId(f64),

    #[error("fit request has an odd number of coordinates ({0})")]
    OddCoordinates(usize),

    #[error("fit response must have 5 elements, got {0}")]
    ResponseLength(usize),

    #[error("fitting worker is no longer running")]
    Disconnected,

    #[error("failed to start fitting worker: {0}")]
    Spawn(#[from] std::io::Error),
}
