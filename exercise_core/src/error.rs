//! Error types for the exercise_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for exercise_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
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

    /// Proposed exercise failed a field rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// Identifier is not well-formed for the store
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Query parameter could not be turned into a filter condition
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Store operation failed
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl Error {
    /// True for errors caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::InvalidIdentifier(_) | Error::InvalidFilter(_)
        )
    }
}
