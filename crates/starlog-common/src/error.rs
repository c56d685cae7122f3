//! Error types for Starlog

use thiserror::Error;

/// Result type alias for Starlog operations
pub type Result<T> = std::result::Result<T, JournalError>;

/// Main error type for Starlog
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The single fatal per-record condition: the line is not a JSON object,
    /// or lacks a usable discriminator or timestamp. The record is skipped;
    /// the stream continues.
    #[error("Structurally invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Side-car file not available: {0}")]
    SidecarUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl JournalError {
    /// True when the error only invalidates a single record and the host
    /// should keep ingesting.
    pub fn is_per_record(&self) -> bool {
        matches!(
            self,
            JournalError::InvalidRecord(_) | JournalError::InvalidTimestamp { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_record_classification() {
        assert!(JournalError::InvalidRecord("not an object".into()).is_per_record());
        assert!(!JournalError::Config("bad".into()).is_per_record());
        let io = JournalError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!io.is_per_record());
    }
}
