//! Import error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: missing required field '{field}'")]
    MissingField { row: usize, field: String },

    #[error("row {row}: invalid value in '{field}': {message}")]
    InvalidField {
        row: usize,
        field: String,
        message: String,
    },

    #[error("unsupported file type: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
