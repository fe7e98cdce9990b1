//! Service configuration

use ecclesia_api_client::{ApiClient, ApiConfig, CatalogApi};
use ecclesia_db_client::{CatalogStore, DbClient, DbConfig};
use std::sync::Arc;

use crate::backend::BackendPreference;
use crate::error::{CatalogError, Result};
use crate::service::DataService;

/// Backends to connect and which one to try first
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub database: Option<DbConfig>,
    pub api: Option<ApiConfig>,
    pub preference: BackendPreference,
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<()> {
        if self.database.is_none() && self.api.is_none() {
            return Err(CatalogError::Config(
                "configure a database, a REST API, or both".into(),
            ));
        }
        if let Some(ref db) = self.database {
            if db.url.trim().is_empty() {
                return Err(CatalogError::Config("database URL is empty".into()));
            }
            if db.api_key.trim().is_empty() {
                return Err(CatalogError::Config("database API key is empty".into()));
            }
            if db.row_limit == 0 {
                return Err(CatalogError::Config("row limit must be positive".into()));
            }
        }
        if let Some(ref api) = self.api {
            if api.base_url.trim().is_empty() {
                return Err(CatalogError::Config("REST API URL is empty".into()));
            }
        }
        Ok(())
    }
}

impl DataService {
    /// Connect the configured backends
    pub fn from_config(config: CatalogConfig) -> Result<Self> {
        config.validate()?;

        let database = match config.database {
            Some(db) => Some(Arc::new(DbClient::new(db)?) as Arc<dyn CatalogStore>),
            None => None,
        };
        let api = match config.api {
            Some(api) => Some(Arc::new(ApiClient::new(api)?) as Arc<dyn CatalogApi>),
            None => None,
        };

        tracing::info!(
            database = database.is_some(),
            api = api.is_some(),
            preference = ?config.preference,
            "Catalog data service configured"
        );
        Ok(DataService::new(database, api).with_preference(config.preference))
    }
}
