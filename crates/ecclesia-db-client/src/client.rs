//! HTTP client for the database's PostgREST interface

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

use crate::error::{DbError, DriverErrorBody, Result};
use crate::query::{id_filter, sanitize_term, Select};
use crate::rows::*;
use crate::schema::*;
use crate::store::CatalogStore;

/// Media type asking for a single JSON object instead of an array
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Database client
#[derive(Debug, Clone)]
pub struct DbClient {
    config: DbConfig,
    client: Client,
}

impl DbClient {
    /// Create a new database client
    pub fn new(config: DbConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(DbError::Config("database URL is empty".into()));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if !config.api_key.is_empty() {
            let key = header::HeaderValue::from_str(&config.api_key)
                .map_err(|e| DbError::Config(format!("invalid API key: {}", e)))?;
            let bearer = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| DbError::Config(format!("invalid API key: {}", e)))?;
            headers.insert("apikey", key);
            headers.insert(header::AUTHORIZATION, bearer);
        }
        if let Some(ref schema) = config.schema {
            let profile = header::HeaderValue::from_str(schema)
                .map_err(|e| DbError::Config(format!("invalid schema: {}", e)))?;
            headers.insert("Accept-Profile", profile.clone());
            headers.insert("Content-Profile", profile);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Client configuration
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    // ==================== Helper Methods ====================

    fn url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client.request(method, self.url(table))
    }

    /// Turn a non-2xx response into [`DbError::Driver`]
    async fn check(response: Response, table: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: DriverErrorBody = serde_json::from_str(&body).unwrap_or_default();
        let mut message = parsed
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        if let Some(details) = parsed.details.filter(|d| !d.is_empty()) {
            message = format!("{} ({})", message, details);
        }

        tracing::debug!(
            table,
            status = status.as_u16(),
            code = parsed.code.as_deref().unwrap_or(""),
            %message,
            "Database request failed"
        );
        Err(DbError::Driver {
            status: status.as_u16(),
            code: parsed.code,
            message,
        })
    }

    /// Run a select returning every matching row
    async fn select<T: DeserializeOwned>(&self, select: &Select) -> Result<Vec<T>> {
        let response = self
            .request(Method::GET, select.table())
            .query(&select.params())
            .send()
            .await?;
        let response = Self::check(response, select.table()).await?;
        Ok(response.json().await?)
    }

    /// Run a select expecting at most one row
    async fn select_one<T: DeserializeOwned>(&self, select: &Select) -> Result<Option<T>> {
        let response = self
            .request(Method::GET, select.table())
            .header(header::ACCEPT, SINGLE_OBJECT)
            .query(&select.params())
            .send()
            .await?;
        match Self::check(response, select.table()).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(e) if e.is_no_rows() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn insert<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        table: &'static str,
        columns: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .request(Method::POST, table)
            .header(header::ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .query(&[("select", columns)])
            .json(body)
            .send()
            .await?;
        let response = Self::check(response, table).await?;
        Ok(response.json().await?)
    }

    async fn update<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        table: &'static str,
        id: i64,
        columns: &str,
        body: &B,
    ) -> Result<T> {
        let mut params = id_filter(id);
        params.push(("select".to_string(), columns.to_string()));

        let response = self
            .request(Method::PATCH, table)
            .header(header::ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .query(&params)
            .json(body)
            .send()
            .await?;
        match Self::check(response, table).await {
            Ok(response) => Ok(response.json().await?),
            Err(e) if e.is_no_rows() => Err(DbError::NotFound(format!("{} {}", table, id))),
            Err(e) => Err(e),
        }
    }

    /// Delete by id, reporting whether a row was removed
    async fn remove(&self, table: &'static str, id: i64) -> Result<bool> {
        let mut params = id_filter(id);
        params.push(("select".to_string(), "id".to_string()));

        let response = self
            .request(Method::DELETE, table)
            .header("Prefer", "return=representation")
            .query(&params)
            .send()
            .await?;
        let response = Self::check(response, table).await?;
        let removed: Vec<serde_json::Value> = response.json().await?;
        Ok(!removed.is_empty())
    }

    /// Row count without transferring rows
    async fn count(&self, table: &'static str) -> Result<u64> {
        let response = self
            .request(Method::HEAD, table)
            .header("Prefer", "count=exact")
            .query(&[("select", "id")])
            .send()
            .await?;
        let response = Self::check(response, table).await?;
        let range = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| DbError::InvalidResponse(format!("{} count without Content-Range", table)))?;
        parse_content_range(range)
            .ok_or_else(|| DbError::InvalidResponse(format!("unparseable Content-Range: {}", range)))
    }

    /// Sorted distinct non-empty values of an entity column
    async fn distinct(&self, column: &str, state: Option<&str>) -> Result<Vec<String>> {
        let mut select = Select::new(ENTITIES)
            .columns(column)
            .not_null(column);
        if let Some(state) = state.filter(|s| !s.is_empty()) {
            select = select.eq("estado", state);
        }
        let select = select.order_asc(column);

        let rows: Vec<serde_json::Value> = self.select(&select).await?;
        let values: BTreeSet<String> = rows
            .iter()
            .filter_map(|row| row.get(column).and_then(|v| v.as_str()))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        Ok(values.into_iter().collect())
    }
}

/// Total from a `Content-Range` header such as `0-24/3573` or `*/0`
pub(crate) fn parse_content_range(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

#[async_trait]
impl CatalogStore for DbClient {
    async fn ping(&self) -> Result<()> {
        let select = Select::new(CLERGY).columns("id").limit(1);
        self.select::<serde_json::Value>(&select).await?;
        Ok(())
    }

    // ==================== Entities ====================

    async fn list_entities(&self) -> Result<Vec<EntityRow>> {
        let select = Select::new(ENTITIES)
            .columns(ENTITY_SELECT)
            .order_asc("nome")
            .limit(self.config.row_limit);
        self.select(&select).await
    }

    async fn get_entity(&self, id: i64) -> Result<Option<EntityRow>> {
        let select = Select::new(ENTITIES).columns(ENTITY_SELECT).eq("id", id);
        self.select_one(&select).await
    }

    async fn search_entities(&self, term: &str) -> Result<Vec<EntityRow>> {
        if sanitize_term(term).is_empty() {
            return Ok(Vec::new());
        }
        let select = Select::new(ENTITIES)
            .columns(ENTITY_SELECT)
            .ilike_any(&SEARCH_COLUMNS, term)
            .order_asc("nome")
            .limit(SEARCH_LIMIT);
        self.select(&select).await
    }

    async fn create_entity(&self, input: &EntityInput) -> Result<EntityRow> {
        self.insert(ENTITIES, ENTITY_SELECT, input).await
    }

    async fn update_entity(&self, id: i64, input: &EntityInput) -> Result<EntityRow> {
        self.update(ENTITIES, id, ENTITY_SELECT, input).await
    }

    async fn delete_entity(&self, id: i64) -> Result<bool> {
        self.remove(ENTITIES, id).await
    }

    // ==================== Dioceses ====================

    async fn list_dioceses(&self) -> Result<Vec<DioceseRow>> {
        let select = Select::new(DIOCESES)
            .columns(DIOCESE_SELECT)
            .order_asc("nome")
            .limit(self.config.row_limit);
        self.select(&select).await
    }

    async fn get_diocese(&self, id: i64) -> Result<Option<DioceseRow>> {
        let select = Select::new(DIOCESES).columns(DIOCESE_SELECT).eq("id", id);
        self.select_one(&select).await
    }

    async fn create_diocese(&self, input: &DioceseInput) -> Result<DioceseRow> {
        self.insert(DIOCESES, DIOCESE_SELECT, input).await
    }

    async fn update_diocese(&self, id: i64, input: &DioceseInput) -> Result<DioceseRow> {
        self.update(DIOCESES, id, DIOCESE_SELECT, input).await
    }

    async fn delete_diocese(&self, id: i64) -> Result<bool> {
        self.remove(DIOCESES, id).await
    }

    // ==================== Clergy ====================

    async fn list_clergy(&self) -> Result<Vec<ClergyRow>> {
        let select = Select::new(CLERGY)
            .order_asc("nome_completo")
            .limit(self.config.row_limit);
        self.select(&select).await
    }

    async fn get_clergy(&self, id: i64) -> Result<Option<ClergyRow>> {
        self.select_one(&Select::new(CLERGY).eq("id", id)).await
    }

    async fn create_clergy(&self, input: &ClergyInput) -> Result<ClergyRow> {
        self.insert(CLERGY, "*", input).await
    }

    async fn update_clergy(&self, id: i64, input: &ClergyInput) -> Result<ClergyRow> {
        self.update(CLERGY, id, "*", input).await
    }

    async fn delete_clergy(&self, id: i64) -> Result<bool> {
        self.remove(CLERGY, id).await
    }

    // ==================== Photos ====================

    async fn list_photos(&self, entity_id: i64) -> Result<Vec<PhotoRow>> {
        let select = Select::new(PHOTOS)
            .eq("id_entidade", entity_id)
            .order_asc("ordem");
        self.select(&select).await
    }

    async fn cover_photo(&self, entity_id: i64) -> Result<Option<PhotoRow>> {
        let select = Select::new(PHOTOS)
            .eq("id_entidade", entity_id)
            .order_asc("ordem")
            .limit(1);
        let mut rows: Vec<PhotoRow> = self.select(&select).await?;
        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    async fn create_photo(&self, input: &PhotoInput) -> Result<PhotoRow> {
        self.insert(PHOTOS, "*", input).await
    }

    async fn update_photo(&self, id: i64, input: &PhotoInput) -> Result<PhotoRow> {
        self.update(PHOTOS, id, "*", input).await
    }

    async fn delete_photo(&self, id: i64) -> Result<bool> {
        self.remove(PHOTOS, id).await
    }

    // ==================== Reference Data ====================

    async fn list_states(&self) -> Result<Vec<String>> {
        self.distinct("estado", None).await
    }

    async fn list_cities(&self, state: Option<&str>) -> Result<Vec<String>> {
        self.distinct("cidade", state).await
    }

    async fn counts(&self) -> Result<TableCounts> {
        let (entities, dioceses, clergy) = tokio::try_join!(
            self.count(ENTITIES),
            self.count(DIOCESES),
            self.count(CLERGY),
        )?;
        Ok(TableCounts {
            entities,
            dioceses,
            clergy,
        })
    }
}
