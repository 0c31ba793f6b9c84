use std::path::PathBuf;
use thiserror::Error;

/// The main error type for bboxeval operations.
#[derive(Debug, Error)]
pub enum BboxEvalError {
    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    #[error("Invalid range: {message}")]
    InvalidRange { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl BboxEvalError {
    pub(crate) fn invalid_range(message: impl Into<String>) -> Self {
        BboxEvalError::InvalidRange {
            message: message.into(),
        }
    }
}
