//! Ecclesia SDK - unified access to the ecclesiastical catalog
//!
//! Reconciles two backends behind one [`DataService`]:
//!
//! - **Database** ([`ecclesia_db_client`]): primary, queried table by table
//!   with declarative relation inclusion
//! - **REST API** ([`ecclesia_api_client`]): secondary, used when the
//!   database fails or has been abandoned after a failed write
//!
//! Both wire shapes are mapped into the canonical [`model`] types.
//!
//! # Example
//!
//! ```rust,no_run
//! use ecclesia_sdk::{CatalogConfig, DataService, EntityFilter};
//! use ecclesia_api_client::ApiConfig;
//!
//! # async fn example() -> ecclesia_sdk::Result<()> {
//! let service = DataService::from_config(CatalogConfig {
//!     api: Some(ApiConfig::default()),
//!     ..Default::default()
//! })?;
//!
//! let cathedrals = service
//!     .list_entities(&EntityFilter::default().with_state("SP"))
//!     .await?;
//! for entity in &cathedrals {
//!     println!("{} - {}", entity.name, entity.city);
//! }
//! # Ok(())
//! # }
//! ```

// Backend selection and in-memory backends
pub mod backend;

// Service configuration
pub mod config;

// Human-readable formatting
pub mod display;

// Error types
pub mod error;

// List filters
pub mod filter;

// Typed write inputs
pub mod input;

// Wire shape to canonical model conversions
pub mod mapping;

// Canonical model
pub mod model;

// Unified data service
pub mod service;

// Re-export main types
pub use backend::{BackendPreference, BackendSelector};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use filter::{DioceseFilter, EntityFilter};
pub use input::*;
pub use model::*;
pub use service::DataService;
