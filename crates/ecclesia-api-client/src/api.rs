//! The REST surface as a trait, so callers can swap in test doubles

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::error::Result;
use crate::types::*;

/// Operations exposed by the catalog REST API.
///
/// Single-item reads raise [`crate::ApiError::NotFound`] for unknown ids;
/// deletes raise it when nothing was deleted.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /health`
    async fn health(&self, ctx: &RequestContext) -> Result<HealthStatus>;

    // Entities
    async fn list_entities(&self, query: &EntityQuery, ctx: &RequestContext) -> Result<EntityList>;
    async fn get_entity(&self, id: i64, ctx: &RequestContext) -> Result<ApiEntity>;
    async fn create_entity(&self, input: &ApiEntityInput, ctx: &RequestContext) -> Result<ApiEntity>;
    async fn update_entity(
        &self,
        id: i64,
        input: &ApiEntityInput,
        ctx: &RequestContext,
    ) -> Result<ApiEntity>;
    async fn delete_entity(&self, id: i64, ctx: &RequestContext) -> Result<()>;

    // Dioceses
    async fn list_dioceses(&self, query: &DioceseQuery, ctx: &RequestContext) -> Result<DioceseList>;
    async fn get_diocese(&self, id: i64, ctx: &RequestContext) -> Result<ApiDiocese>;
    async fn create_diocese(&self, input: &ApiDioceseInput, ctx: &RequestContext) -> Result<ApiDiocese>;
    async fn update_diocese(
        &self,
        id: i64,
        input: &ApiDioceseInput,
        ctx: &RequestContext,
    ) -> Result<ApiDiocese>;
    async fn delete_diocese(&self, id: i64, ctx: &RequestContext) -> Result<()>;

    // Clergy
    async fn list_clergy(&self, ctx: &RequestContext) -> Result<ClergyList>;
    async fn get_clergy(&self, id: i64, ctx: &RequestContext) -> Result<ApiClergy>;
    async fn create_clergy(&self, input: &ApiClergyInput, ctx: &RequestContext) -> Result<ApiClergy>;
    async fn update_clergy(
        &self,
        id: i64,
        input: &ApiClergyInput,
        ctx: &RequestContext,
    ) -> Result<ApiClergy>;
    async fn delete_clergy(&self, id: i64, ctx: &RequestContext) -> Result<()>;

    // Reference vocabularies
    async fn list_jurisdictions(&self, ctx: &RequestContext) -> Result<Vec<String>>;
    async fn list_kinds(&self, ctx: &RequestContext) -> Result<Vec<String>>;
    async fn list_states(&self, ctx: &RequestContext) -> Result<Vec<String>>;
}
