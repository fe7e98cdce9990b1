//! Error types for the REST client

use thiserror::Error;

/// REST client error
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered 404
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Server answered with a non-2xx status
    ///
    /// `message` is the server-supplied message, or `HTTP <status>` when the
    /// body carried none.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Transport succeeded but the envelope reported `status: "error"`
    #[error("{0}")]
    Envelope(String),

    /// Response could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether this error means the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Result type for REST operations
pub type Result<T> = std::result::Result<T, ApiError>;
