//! Error types for the prediksi pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PrediksiError>;

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum PrediksiError {
    /// Caller-supplied input is unusable (bad target column, unknown scaling
    /// method). Never produced by internal state.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Too few rows to carry out the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Component not fitted")]
    NotFitted,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for PrediksiError {
    fn from(err: polars::error::PolarsError) -> Self {
        PrediksiError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for PrediksiError {
    fn from(err: serde_json::Error) -> Self {
        PrediksiError::SerializationError(err.to_string())
    }
}
