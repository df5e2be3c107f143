//! Error types used throughout the engine

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use whenly_common::{ErrorClassification, ErrorSeverity};

/// Main error type for Whenly
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum WhenlyError {
    /// Duration below the minimum, or end not after start.
    #[error("Invalid time range: {0}")]
    InvalidGeometry(String),

    /// Candidate overlaps another block owned by the same participant.
    #[error("Overlap: {0}")]
    Collision(String),

    /// A write for the same block or day has not resolved yet.
    #[error("Write already in flight: {0}")]
    WriteInFlight(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Viewer does not own the block.
    #[error("Not allowed: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WhenlyError {
    /// Message suitable for inline display under a dialog's time pickers.
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidGeometry(msg)
            | Self::Collision(msg)
            | Self::WriteInFlight(msg)
            | Self::Persistence(msg)
            | Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::Config(msg)
            | Self::InvalidInput(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

impl ErrorClassification for WhenlyError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::WriteInFlight(_))
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound(_) | Self::InvalidGeometry(_) => ErrorSeverity::Info,
            Self::Collision(_) | Self::WriteInFlight(_) | Self::Unauthorized(_) => {
                ErrorSeverity::Warning
            }
            Self::Persistence(_) | Self::Config(_) | Self::InvalidInput(_) => ErrorSeverity::Error,
            Self::Internal(_) => ErrorSeverity::Critical,
        }
    }

    fn is_critical(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Result type alias for Whenly operations
pub type Result<T> = std::result::Result<T, WhenlyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape_is_tagged() {
        let err = WhenlyError::Collision("This time overlaps with an existing block".into());
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["type"], "Collision");
        assert_eq!(json["message"], "This time overlaps with an existing block");
    }

    #[test]
    fn test_classification() {
        assert!(WhenlyError::Persistence("offline".into()).is_retryable());
        assert!(!WhenlyError::Collision("x".into()).is_retryable());
        assert_eq!(WhenlyError::InvalidGeometry("x".into()).severity(), ErrorSeverity::Info);
        assert!(WhenlyError::Internal("x".into()).is_critical());
        assert_eq!(WhenlyError::Config("bad".into()).user_message(), "bad");
    }
}
