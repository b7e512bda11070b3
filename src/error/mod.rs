//! Error handling for the forecasting engine.
//!
//! The numeric core never fails: missing data is reported as a status value and
//! degenerate inputs are clamped. Errors only arise at the edges, when loading
//! datasets, parsing configuration or running work on the async runtime.

use std::time::Duration;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors that can occur around the forecasting core
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding a Parquet file
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error handling Arrow record batches
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error converting between Arrow batches and records
    #[error("Record conversion error: {0}")]
    SerdeArrow(#[from] serde_arrow::Error),

    /// Error decoding JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input that cannot be interpreted at all
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A caller-imposed deadline expired
    #[error("{operation} did not finish within {timeout:?}")]
    Timeout {
        /// Name of the operation that was cancelled
        operation: String,
        /// The deadline that was exceeded
        timeout: Duration,
    },

    /// A blocking worker panicked or was cancelled
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl ForecastError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result type for engine operations that can fail
pub type Result<T> = std::result::Result<T, ForecastError>;
