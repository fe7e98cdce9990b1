//! Error types for the database client

use serde::Deserialize;
use thiserror::Error;

/// Driver code reported when a single-row read matched nothing
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Database client error
#[derive(Debug, Error)]
pub enum DbError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The database rejected the query
    #[error("Database error {status}: {message}")]
    Driver {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A write targeted a row that does not exist
    #[error("Row not found: {0}")]
    NotFound(String),

    /// Invalid response from the database
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DbError {
    /// Whether the driver reported that no rows matched
    pub fn is_no_rows(&self) -> bool {
        matches!(self, DbError::Driver { code: Some(code), .. } if code == NO_ROWS_CODE)
    }
}

/// Error body returned by the database's HTTP interface
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DriverErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Result type for database operations
pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rows_detection() {
        let err = DbError::Driver {
            status: 406,
            code: Some(NO_ROWS_CODE.to_string()),
            message: "JSON object requested, multiple (or no) rows returned".into(),
        };
        assert!(err.is_no_rows());

        let other = DbError::Driver {
            status: 400,
            code: Some("22P02".into()),
            message: "invalid input syntax".into(),
        };
        assert!(!other.is_no_rows());
    }
}
