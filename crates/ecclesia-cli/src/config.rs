//! Configuration for the catalog CLI
//!
//! CLI arguments and environment variable handling using clap.

use clap::{ArgAction, Parser};
use ecclesia_api_client::ApiConfig;
use ecclesia_db_client::DbConfig;
use ecclesia_sdk::{BackendPreference, CatalogConfig};

use crate::commands::Command;

/// Ecclesia - query the ecclesiastical catalog
#[derive(Parser, Debug, Clone)]
#[command(name = "ecclesia")]
#[command(about = "Query cathedrals, parishes, dioceses and clergy in the catalog")]
pub struct Args {
    /// Database project URL
    #[arg(long, env = "CATALOG_DB_URL")]
    pub db_url: Option<String>,

    /// Database publishable API key
    #[arg(long, env = "CATALOG_DB_KEY", hide_env_values = true)]
    pub db_key: Option<String>,

    /// Non-default database schema
    #[arg(long, env = "CATALOG_DB_SCHEMA")]
    pub db_schema: Option<String>,

    /// REST API base URL, including the /api prefix
    #[arg(long, env = "CATALOG_API_URL")]
    pub api_url: Option<String>,

    /// REST API bearer token
    #[arg(long, env = "CATALOG_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Try the database before the REST API
    #[arg(long, env = "PREFER_DATABASE", default_value_t = true, action = ArgAction::Set)]
    pub prefer_database: bool,

    /// Request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.db_url.is_none() && self.api_url.is_none() {
            return Err("set CATALOG_DB_URL, CATALOG_API_URL, or both".to_string());
        }
        if self.db_url.is_some() && self.db_key.as_deref().map_or(true, str::is_empty) {
            return Err("CATALOG_DB_KEY is required when CATALOG_DB_URL is set".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("REQUEST_TIMEOUT_SECS must be positive".to_string());
        }
        Ok(())
    }

    /// Backend configuration for the data service
    pub fn catalog_config(&self) -> CatalogConfig {
        let database = self.db_url.as_ref().map(|url| DbConfig {
            url: url.clone(),
            api_key: self.db_key.clone().unwrap_or_default(),
            schema: self.db_schema.clone(),
            timeout_secs: self.timeout_secs,
            ..Default::default()
        });
        let api = self.api_url.as_ref().map(|url| ApiConfig {
            base_url: url.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
        });
        let preference = if self.prefer_database {
            BackendPreference::PreferPrimary
        } else {
            BackendPreference::PreferSecondary
        };

        CatalogConfig {
            database,
            api,
            preference,
        }
    }
}
