//! Application error type.
//!
//! Every failure that reaches `main` carries the process exit code to use:
//!
//! - `2`: bad input or usage (unparseable points, invalid arguments)
//! - `4`: internal or I/O failure

use crate::dispatch::DispatchError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        let exit_code = match err {
            DispatchError::EmptyMessage
            | DispatchError::InvalidId(_)
            | DispatchError::OddCoordinates(_)
            | DispatchError::ResponseLength(_) => 2,
            DispatchError::Disconnected | DispatchError::Spawn(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = AppError::new(2, "Line 3: expected two numbers.");
        assert_eq!(err.to_string(), "Line 3: expected two numbers.");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn dispatch_errors_map_to_exit_codes() {
        assert_eq!(AppError::from(DispatchError::OddCoordinates(3)).exit_code(), 2);
        assert_eq!(AppError::from(DispatchError::Disconnected).exit_code(), 4);
        let err = AppError::from(DispatchError::ResponseLength(4));
        assert!(err.message().contains("5 elements"));
    }
}
