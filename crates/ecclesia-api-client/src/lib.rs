//! Rust client for the ecclesiastical catalog REST API
//!
//! Every endpoint answers with a `{status, data, message}` envelope; the
//! client unwraps it and turns transport failures, 404s and envelope-level
//! errors into [`ApiError`] variants.
//!
//! # Example
//!
//! ```rust,no_run
//! use ecclesia_api_client::{ApiClient, ApiConfig, CatalogApi, EntityQuery, RequestContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(ApiConfig {
//!     base_url: "http://localhost:3000/api".into(),
//!     ..Default::default()
//! })?;
//!
//! let query = EntityQuery {
//!     estado: Some("SP".into()),
//!     ..Default::default()
//! };
//! let page = client.list_entities(&query, &RequestContext::default()).await?;
//! println!("{} entities", page.total);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod context;
pub mod error;
pub mod types;

// Re-export main types
pub use api::CatalogApi;
pub use client::ApiClient;
pub use context::RequestContext;
pub use error::{ApiError, Result};
pub use types::*;
