//! Error types for the thing registry client

use reqwest::StatusCode;
use thiserror::Error;

/// Thing registry client errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Transport-level failure (connection refused, DNS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registry URL could not be parsed
    #[error("Invalid registry URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An identity value cannot be sent as an HTTP header
    #[error("Invalid value for header {name}: {value:?}")]
    InvalidHeader {
        /// Header name
        name: &'static str,
        /// Offending value
        value: String,
    },

    /// Thing description is not an object with a non-empty string `id`
    #[error("Thing description has no string `id` field")]
    MissingThingId,

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Registry answered with a non-success status
    #[error("Registry returned {status}")]
    Status {
        /// HTTP status code
        status: StatusCode,
        /// Canonical reason phrase
        reason: String,
        /// Response body
        body: String,
    },
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
