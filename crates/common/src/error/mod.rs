//! Error classification shared by every Whenly error enum
//!
//! Each crate owns its own `thiserror` enum; this module only provides the
//! vocabulary the surrounding UI uses to decide how loudly to surface a
//! failure.
//!
//! ## ErrorSeverity Levels
//!
//! | Level | Use Case | Examples |
//! |-------|----------|----------|
//! | **Info** | Expected conditions | Gesture produced no change, block not found |
//! | **Warning** | Degraded but operational | Write already in flight, overlap rejected |
//! | **Error** | Failure requiring attention | Store rejected a write, invalid config |
//! | **Critical** | Integrity at risk | Internal invariant violations |
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use whenly_common::{ErrorClassification, ErrorSeverity};
//!
//! #[derive(Debug)]
//! enum SaveError {
//!     Offline,
//!     Rejected,
//! }
//!
//! impl ErrorClassification for SaveError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, Self::Offline)
//!     }
//!
//!     fn severity(&self) -> ErrorSeverity {
//!         match self {
//!             Self::Offline => ErrorSeverity::Warning,
//!             Self::Rejected => ErrorSeverity::Error,
//!         }
//!     }
//!
//!     fn is_critical(&self) -> bool {
//!         false
//!     }
//!
//!     fn retry_after(&self) -> Option<Duration> {
//!         None
//!     }
//! }
//!
//! assert!(SaveError::Offline.is_retryable());
//! assert_eq!(SaveError::Rejected.severity(), ErrorSeverity::Error);
//! ```

use std::fmt;
use std::time::Duration;

/// Standard interface for classifying errors by their characteristics
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient issues that may succeed if the user
    /// attempts the same action again (for example a store that was briefly
    /// unreachable). Nothing in the engine retries on its own.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    ///
    /// Used for logging and for choosing how the UI surfaces the failure.
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if applicable
    fn retry_after(&self) -> Option<Duration>;
}

/// Error severity levels for logging and user-facing surfacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
