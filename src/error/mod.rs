//! Error handling for the county reconciler.

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for reconciliation runs.
#[derive(Debug, thiserror::Error)]
pub enum ReconcilerError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),
    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// Error reading or writing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Error converting between records and Arrow batches
    #[error("Record conversion error: {0}")]
    Conversion(#[from] serde_arrow::Error),
    /// A required column is missing from a source table
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },
    /// A column holds a type the pipeline cannot read
    #[error("Column {column} has an unexpected type, expected {expected}")]
    InvalidDataType { column: String, expected: String },
    /// A raw county identifier that cannot be normalized
    #[error("Malformed county identifier: {0:?}")]
    MalformedKey(String),
    /// The classification table repeated a normalized county identifier
    #[error("Duplicate county identifier in classification table: {0}")]
    DuplicateKey(String),
    /// Error with the pipeline configuration
    #[error("Configuration error: {0}")]
    Config(String),
    /// Error with source metadata (paths, formats, register names)
    #[error("Metadata error: {0}")]
    Metadata(String),
}

impl ReconcilerError {
    /// Shorthand for a missing-column error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Shorthand for a type-mismatch error.
    pub fn invalid_data_type(column: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidDataType {
            column: column.into(),
            expected: expected.into(),
        }
    }
}

/// Result type for reconciler operations
pub type Result<T> = std::result::Result<T, ReconcilerError>;
