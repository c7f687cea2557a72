use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for framelabel operations.
#[derive(Debug, Error)]
pub enum FramelabelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse session JSON from {path}: {source}")]
    SessionJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write session JSON to {path}: {source}")]
    SessionJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed input at the object construction boundary.
    #[error("Data error: {0}")]
    Data(String),

    /// Misuse of the merge/split/group contract.
    #[error("Argument error: {0}")]
    Argument(String),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl FramelabelError {
    /// Returns true for errors raised by the object factory on bad data.
    pub fn is_data_error(&self) -> bool {
        matches!(self, FramelabelError::Data(_))
    }

    /// Returns true for errors raised by merge/split/group misuse.
    pub fn is_argument_error(&self) -> bool {
        matches!(self, FramelabelError::Argument(_))
    }
}
