//! Error types for the catalog SDK

use ecclesia_api_client::ApiError;
use ecclesia_db_client::DbError;
use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// SDK error types
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Network or HTTP failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The addressed record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The REST API reported a logical error despite a 2xx response
    #[error("{0}")]
    Envelope(String),

    /// The database rejected the query
    #[error("Database error: {0}")]
    Database(String),

    /// Input rejected before dispatch
    #[error("Validation error: {0}")]
    Validation(String),

    /// No backend could serve the request
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

impl From<ApiError> for CatalogError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http(e) => CatalogError::Transport(e.to_string()),
            ApiError::Json(e) => CatalogError::Serialization(e.to_string()),
            ApiError::NotFound(what) => CatalogError::NotFound(what),
            ApiError::Status { status, message } => {
                CatalogError::Transport(format!("{} (HTTP {})", message, status))
            }
            ApiError::Envelope(message) => CatalogError::Envelope(message),
            ApiError::InvalidResponse(msg) => CatalogError::Serialization(msg),
            ApiError::Config(msg) => CatalogError::Config(msg),
        }
    }
}

impl From<DbError> for CatalogError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Http(e) => CatalogError::Transport(e.to_string()),
            DbError::Json(e) => CatalogError::Serialization(e.to_string()),
            DbError::NotFound(what) => CatalogError::NotFound(what),
            DbError::Config(msg) => CatalogError::Config(msg),
            other => CatalogError::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}
