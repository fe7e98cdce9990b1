//! Database operations as a trait, so the data service can run against fakes

use async_trait::async_trait;

use crate::error::Result;
use crate::rows::*;
use crate::schema::{JURISDICTION_VALUES, KIND_VALUES};

/// Operations the catalog needs from the database.
///
/// Single-row reads return `Ok(None)` when the id does not exist. Updates
/// of a missing row fail with [`crate::DbError::NotFound`]; deletes report
/// whether a row was removed.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Cheap round trip used for health checks
    async fn ping(&self) -> Result<()>;

    // Entities
    async fn list_entities(&self) -> Result<Vec<EntityRow>>;
    async fn get_entity(&self, id: i64) -> Result<Option<EntityRow>>;
    async fn search_entities(&self, term: &str) -> Result<Vec<EntityRow>>;
    async fn create_entity(&self, input: &EntityInput) -> Result<EntityRow>;
    async fn update_entity(&self, id: i64, input: &EntityInput) -> Result<EntityRow>;
    async fn delete_entity(&self, id: i64) -> Result<bool>;

    // Dioceses
    async fn list_dioceses(&self) -> Result<Vec<DioceseRow>>;
    async fn get_diocese(&self, id: i64) -> Result<Option<DioceseRow>>;
    async fn create_diocese(&self, input: &DioceseInput) -> Result<DioceseRow>;
    async fn update_diocese(&self, id: i64, input: &DioceseInput) -> Result<DioceseRow>;
    async fn delete_diocese(&self, id: i64) -> Result<bool>;

    // Clergy
    async fn list_clergy(&self) -> Result<Vec<ClergyRow>>;
    async fn get_clergy(&self, id: i64) -> Result<Option<ClergyRow>>;
    async fn create_clergy(&self, input: &ClergyInput) -> Result<ClergyRow>;
    async fn update_clergy(&self, id: i64, input: &ClergyInput) -> Result<ClergyRow>;
    async fn delete_clergy(&self, id: i64) -> Result<bool>;

    // Photos
    /// Photos of an entity, ordered by `ordem`
    async fn list_photos(&self, entity_id: i64) -> Result<Vec<PhotoRow>>;
    /// Lowest-ordered photo of an entity
    async fn cover_photo(&self, entity_id: i64) -> Result<Option<PhotoRow>>;
    async fn create_photo(&self, input: &PhotoInput) -> Result<PhotoRow>;
    async fn update_photo(&self, id: i64, input: &PhotoInput) -> Result<PhotoRow>;
    async fn delete_photo(&self, id: i64) -> Result<bool>;

    // Reference data
    /// Distinct non-empty states with at least one entity, sorted
    async fn list_states(&self) -> Result<Vec<String>>;
    /// Distinct non-empty cities, optionally within one state, sorted
    async fn list_cities(&self, state: Option<&str>) -> Result<Vec<String>>;
    /// Row totals of the three catalog tables
    async fn counts(&self) -> Result<TableCounts>;

    /// Values of the `tipo` column
    fn kinds(&self) -> Vec<String> {
        KIND_VALUES.iter().map(|k| k.to_string()).collect()
    }

    /// Values of the `jurisdicao` column
    fn jurisdictions(&self) -> Vec<String> {
        JURISDICTION_VALUES.iter().map(|j| j.to_string()).collect()
    }
}
