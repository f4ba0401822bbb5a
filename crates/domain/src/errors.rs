//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Worksnap
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum WorksnapError {
    #[error("Interpreter timed out: {0}")]
    InterpreterTimeout(String),

    #[error("Interpreter error: {0}")]
    InterpreterError(String),

    #[error("Parse failure: {0}")]
    ParseFailure(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WorksnapError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InterpreterTimeout(_) => "interpreter_timeout",
            Self::InterpreterError(_) => "interpreter_error",
            Self::ParseFailure(_) => "parse_failure",
            Self::NotFound(_) => "not_found",
            Self::CorruptDocument(_) => "corrupt_document",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the error came from the automation interpreter.
    pub fn is_interpreter_failure(&self) -> bool {
        matches!(self, Self::InterpreterTimeout(_) | Self::InterpreterError(_))
    }
}

/// Result type alias for Worksnap operations
pub type Result<T> = std::result::Result<T, WorksnapError>;
