//! HTTP client for the catalog REST API

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::api::CatalogApi;
use crate::context::RequestContext;
use crate::error::{ApiError, Result};
use crate::types::*;

/// HTTP client for the catalog REST API
///
/// # Example
///
/// ```rust,no_run
/// use ecclesia_api_client::{ApiClient, ApiConfig, CatalogApi, RequestContext};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(ApiConfig::default())?;
/// let ctx = RequestContext::default();
///
/// let health = client.health(&ctx).await?;
/// let diocese = client.get_diocese(3, &ctx).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    client: Client,
}

impl ApiClient {
    /// Create a new REST client
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(ref api_key) = config.api_key {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| ApiError::Config(format!("invalid API key: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Client configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // ==================== Helper Methods ====================

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// Start a request, honouring a caller-supplied client and headers
    fn request(&self, method: Method, endpoint: &str, ctx: &RequestContext) -> RequestBuilder {
        let mut builder = match ctx.client() {
            Some(client) => {
                // A foreign client lacks our default headers.
                let mut builder = client
                    .request(method, self.url(endpoint))
                    .header(header::CONTENT_TYPE, "application/json");
                if let (Some(key), false) = (&self.config.api_key, ctx.has_authorization()) {
                    builder = builder.bearer_auth(key);
                }
                builder
            }
            None => self.client.request(method, self.url(endpoint)),
        };

        if !ctx.headers().is_empty() {
            builder = builder.headers(ctx.headers().clone());
        }
        builder
    }

    /// Send a request and unwrap the response envelope.
    ///
    /// Returns `None` for 204 responses and envelopes without `data`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, endpoint: &str) -> Result<Option<T>> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(endpoint.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            tracing::debug!(endpoint, status = status.as_u16(), %message, "API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_slice(&bytes)?;
        if envelope.is_error() {
            let message = envelope
                .message
                .unwrap_or_else(|| "API reported an error".to_string());
            tracing::debug!(endpoint, %message, "API envelope reported an error");
            return Err(ApiError::Envelope(message));
        }

        match envelope.data {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(data) => Ok(Some(serde_json::from_value(data)?)),
        }
    }

    /// Like [`Self::send`], but an empty payload is an error
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, endpoint: &str) -> Result<T> {
        self.send(request, endpoint)
            .await?
            .ok_or_else(|| ApiError::InvalidResponse(format!("{} returned no data", endpoint)))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
        ctx: &RequestContext,
    ) -> Result<T> {
        let mut request = self.request(Method::GET, endpoint, ctx);
        if !params.is_empty() {
            request = request.query(params);
        }
        self.fetch(request, endpoint).await
    }

    async fn write<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
        ctx: &RequestContext,
    ) -> Result<T> {
        let request = self.request(method, endpoint, ctx).json(body);
        self.fetch(request, endpoint).await
    }

    async fn delete(&self, endpoint: &str, ctx: &RequestContext) -> Result<()> {
        let request = self.request(Method::DELETE, endpoint, ctx);
        self.send::<serde_json::Value>(request, endpoint).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn health(&self, ctx: &RequestContext) -> Result<HealthStatus> {
        self.get("/health", &[], ctx).await
    }

    // ==================== Entities ====================

    async fn list_entities(&self, query: &EntityQuery, ctx: &RequestContext) -> Result<EntityList> {
        self.get("/entidades", &query.to_params(), ctx).await
    }

    async fn get_entity(&self, id: i64, ctx: &RequestContext) -> Result<ApiEntity> {
        self.get(&format!("/entidades/{}", id), &[], ctx).await
    }

    async fn create_entity(&self, input: &ApiEntityInput, ctx: &RequestContext) -> Result<ApiEntity> {
        self.write(Method::POST, "/entidades", input, ctx).await
    }

    async fn update_entity(
        &self,
        id: i64,
        input: &ApiEntityInput,
        ctx: &RequestContext,
    ) -> Result<ApiEntity> {
        self.write(Method::PUT, &format!("/entidades/{}", id), input, ctx)
            .await
    }

    async fn delete_entity(&self, id: i64, ctx: &RequestContext) -> Result<()> {
        self.delete(&format!("/entidades/{}", id), ctx).await
    }

    // ==================== Dioceses ====================

    async fn list_dioceses(&self, query: &DioceseQuery, ctx: &RequestContext) -> Result<DioceseList> {
        self.get("/dioceses", &query.to_params(), ctx).await
    }

    async fn get_diocese(&self, id: i64, ctx: &RequestContext) -> Result<ApiDiocese> {
        self.get(&format!("/dioceses/{}", id), &[], ctx).await
    }

    async fn create_diocese(&self, input: &ApiDioceseInput, ctx: &RequestContext) -> Result<ApiDiocese> {
        self.write(Method::POST, "/dioceses", input, ctx).await
    }

    async fn update_diocese(
        &self,
        id: i64,
        input: &ApiDioceseInput,
        ctx: &RequestContext,
    ) -> Result<ApiDiocese> {
        self.write(Method::PUT, &format!("/dioceses/{}", id), input, ctx)
            .await
    }

    async fn delete_diocese(&self, id: i64, ctx: &RequestContext) -> Result<()> {
        self.delete(&format!("/dioceses/{}", id), ctx).await
    }

    // ==================== Clergy ====================

    async fn list_clergy(&self, ctx: &RequestContext) -> Result<ClergyList> {
        self.get("/clero", &[], ctx).await
    }

    async fn get_clergy(&self, id: i64, ctx: &RequestContext) -> Result<ApiClergy> {
        self.get(&format!("/clero/{}", id), &[], ctx).await
    }

    async fn create_clergy(&self, input: &ApiClergyInput, ctx: &RequestContext) -> Result<ApiClergy> {
        self.write(Method::POST, "/clero", input, ctx).await
    }

    async fn update_clergy(
        &self,
        id: i64,
        input: &ApiClergyInput,
        ctx: &RequestContext,
    ) -> Result<ApiClergy> {
        self.write(Method::PUT, &format!("/clero/{}", id), input, ctx)
            .await
    }

    async fn delete_clergy(&self, id: i64, ctx: &RequestContext) -> Result<()> {
        self.delete(&format!("/clero/{}", id), ctx).await
    }

    // ==================== Reference Lists ====================

    async fn list_jurisdictions(&self, ctx: &RequestContext) -> Result<Vec<String>> {
        self.get("/jurisdicoes", &[], ctx).await
    }

    async fn list_kinds(&self, ctx: &RequestContext) -> Result<Vec<String>> {
        self.get("/tipos", &[], ctx).await
    }

    async fn list_states(&self, ctx: &RequestContext) -> Result<Vec<String>> {
        self.get("/estados", &[], ctx).await
    }
}
