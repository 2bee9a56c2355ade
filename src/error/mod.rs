//! Error handling for dataset preparation and summaries.

pub mod util;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors raised while preparing or summarising the patient dataset
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dataset source could not be reached or read
    #[error("Data unavailable from {location}: {reason}")]
    DataUnavailable {
        /// Path or URL of the source
        location: String,
        /// What went wrong
        reason: String,
    },

    /// A required column is missing or holds invalid values
    #[error("Schema error: {0}")]
    Schema(String),

    /// A gender selector could not be parsed
    #[error("Invalid gender '{0}', expected 'Male' or 'Female'")]
    InvalidGender(String),

    /// Summary output could not be serialised
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Arrow kernel failure
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Parquet decoding failure
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),
}

impl Error {
    /// Create a `DataUnavailable` error for a source
    pub fn unavailable(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Create a `Schema` error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Whether the error means the source itself could not be read
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }

    /// Whether the error is a schema validation failure
    #[must_use]
    pub const fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, Error>;
