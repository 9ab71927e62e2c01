//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Tallyline
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TallylineError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected request input (inverted range, oversized window, malformed
    /// record). Controllers map this to their "bad request" response.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TallylineError {
    /// Whether the caller sent something unusable, as opposed to a failure
    /// on our side.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Stable label suitable for log fields.
    pub fn error_label(&self) -> &'static str {
        match self {
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Tallyline operations
pub type Result<T> = std::result::Result<T, TallylineError>;
