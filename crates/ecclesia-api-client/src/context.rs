//! Per-call request context
//!
//! Lets a caller substitute the HTTP transport or attach headers for a single
//! call, e.g. forwarding the credentials of the request being served.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Client;

use crate::error::{ApiError, Result};

/// Request-scoped transport settings
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    client: Option<Client>,
    headers: HeaderMap,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this client instead of the adapter's own
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Add a header to every request made with this context
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Forward a bearer token
    pub fn with_bearer(self, token: &str) -> Result<Self> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ApiError::Config(format!("invalid bearer token: {}", e)))?;
        Ok(self.with_header(AUTHORIZATION, value))
    }

    /// Caller-supplied client, if any
    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    /// Extra headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether the caller supplied its own authorization
    pub fn has_authorization(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }
}
