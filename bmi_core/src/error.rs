//! Error types for the bmi_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bmi_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Weight or height is zero, negative, non-finite or out of range
    #[error("Invalid {field}: {reason}")]
    InvalidMeasurement { field: &'static str, reason: String },

    /// Unit tag not recognized for the named field
    #[error("Unsupported {field} unit: {unit:?}")]
    UnsupportedUnit { field: &'static str, unit: String },

    /// Height value shape does not match its unit
    #[error("Malformed height: {0}")]
    MalformedHeight(String),

    /// Sex is neither male nor female
    #[error("Invalid sex {0:?}: expected \"male\" or \"female\"")]
    InvalidSex(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidMeasurement {
            field,
            reason: reason.into(),
        }
    }
}
