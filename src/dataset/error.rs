//! Dataset error types
//!
//! Every variant is fatal at startup: the dashboard does not serve without
//! its dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the games table
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Source file does not exist
    #[error("Dataset file not found: {0:?}")]
    NotFound(PathBuf),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV framing error (ragged row, bad quoting, invalid UTF-8)
    #[error("{0}")]
    Csv(String),

    /// Header row lacks a required column
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A present value could not be parsed
    #[error("Malformed value on line {line} in column {column}: {value:?}")]
    Malformed {
        line: u64,
        column: &'static str,
        value: String,
    },
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => DatasetError::Io(e),
            _ => DatasetError::Csv(message),
        }
    }
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
