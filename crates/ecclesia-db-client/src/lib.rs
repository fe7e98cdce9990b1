//! Typed query layer over the catalog database
//!
//! The database is a managed PostgreSQL service reached through its
//! PostgREST HTTP interface (`{url}/rest/v1/{table}`). Relations are included
//! declaratively through the `select` parameter, single-row reads use the
//! single-object media type, and driver errors are surfaced as [`DbError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use ecclesia_db_client::{CatalogStore, DbClient, DbConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = DbClient::new(DbConfig {
//!     url: "https://project.example.co".into(),
//!     api_key: "publishable-key".into(),
//!     ..Default::default()
//! })?;
//!
//! if let Some(entity) = db.get_entity(1).await? {
//!     println!("{} has {} photos", entity.nome, entity.fotosentidade.map_or(0, |f| f.len()));
//! }
//! let counts = db.counts().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod query;
pub mod rows;
pub mod schema;
pub mod store;

// Re-export main types
pub use client::DbClient;
pub use error::{DbError, Result, NO_ROWS_CODE};
pub use query::Select;
pub use rows::*;
pub use store::CatalogStore;
