//! Error types for the data-loader crate.
//!
//! Only the ingestion boundary can fail. Once a snapshot is in memory the
//! statistics code works on degenerate values (0, NaN, empty) instead of
//! errors, so nothing downstream of `EvaluationSnapshot` returns these.

use thiserror::Error;

/// Errors that can occur while loading an evaluation snapshot
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Snapshot content is not valid JSON for either supported layout
    #[error("Parse error in {file}: {source}")]
    ParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
