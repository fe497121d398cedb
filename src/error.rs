//! Error types for windowed feature building

use thiserror::Error;

/// Result type alias for windowing operations
pub type Result<T> = std::result::Result<T, WindowError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Invalid lag: {lag} must be smaller than the row count {n_rows}")]
    InvalidLag { lag: usize, n_rows: usize },

    #[error("Column count mismatch: expected {expected} columns, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for WindowError {
    fn from(err: polars::error::PolarsError) -> Self {
        WindowError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for WindowError {
    fn from(err: serde_json::Error) -> Self {
        WindowError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for WindowError {
    fn from(err: ndarray::ShapeError) -> Self {
        WindowError::ShapeMismatch {
            expected: "compatible element count".to_string(),
            actual: err.to_string(),
        }
    }
}
