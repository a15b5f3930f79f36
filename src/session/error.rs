//! Errors from the session's external channels.
//!
//! Both are recoverable: a failed statistics write is logged and play
//! continues; a failed clipboard round-trip falls back to logging the export.

use derive_more::{Display, Error};

/// Key-value store failure, with caller location.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<bincode::Error> for StoreError {
    #[track_caller]
    fn from(err: bincode::Error) -> Self {
        Self::new(format!("Encoding error: {}", err))
    }
}

/// Clipboard failure (permission denied, unavailable).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Clipboard error: {} at {}:{}", message, file, line)]
pub struct ClipboardError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClipboardError {
    /// Creates a new clipboard error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_location() {
        let err = StoreError::new("disk full");
        assert_eq!(err.message, "disk full");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().starts_with("Store error: disk full at "));
    }

    #[test]
    fn test_clipboard_error_display() {
        let err = ClipboardError::new("permission denied");
        assert!(err.to_string().contains("permission denied"));
    }
}
