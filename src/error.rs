//! Error types for the crewbridge CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Errors inside a crew execution never reach this type on the `run` path: they
//! are folded into a structured failure record instead (see `engine`).

use crate::exit_codes;
use thiserror::Error;

/// Main error type for crewbridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// User provided invalid arguments, a missing file or an unreadable request.
    #[error("{0}")]
    UserError(String),

    /// Project files could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The crew execution reported a failure.
    #[error("Crew execution failed: {0}")]
    ExecutionFailed(String),
}

impl BridgeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::UserError(_) => exit_codes::USER_ERROR,
            BridgeError::ConfigError(_) => exit_codes::USER_ERROR,
            BridgeError::ExecutionFailed(_) => exit_codes::EXECUTION_FAILURE,
        }
    }
}

/// Result type alias for crewbridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = BridgeError::UserError("storyboard not found".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = BridgeError::ConfigError("agents.yaml: no agents".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn execution_error_has_correct_exit_code() {
        let err = BridgeError::ExecutionFailed("runtime exited with status 3".to_string());
        assert_eq!(err.exit_code(), exit_codes::EXECUTION_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = BridgeError::ConfigError("missing role".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: missing role");

        let err = BridgeError::ExecutionFailed("No tasks provided".to_string());
        assert_eq!(err.to_string(), "Crew execution failed: No tasks provided");
    }
}
