//! Error types for dash-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dash-core
///
/// Parsing, filtering and row-key derivation never fail; these errors come
/// from the edges of the crate (reading sources, writing exports, loading
/// configuration).
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a source file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV writer error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Column name not present in the table headers
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// Row position outside the dataset
    #[error("row {row} not found, dataset has {count} rows")]
    RowNotFound { row: usize, count: usize },

    /// Export format not recognised
    #[error("unsupported format '{0}', expected 'csv' or 'json'")]
    UnsupportedFormat(String),

    /// Configuration values out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
