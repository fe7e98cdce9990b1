//! Unified data service
//!
//! Routes every catalog operation to the database or the REST API and maps
//! the result into the canonical model.
//!
//! ## Routing
//!
//! - **Reads** try the database while it is preferred. A failure is logged
//!   and the REST API serves that one call; the preference is unchanged.
//! - **Writes** to dioceses and clergy, and every delete, demote the
//!   database on failure and are retried on the REST API. The demotion lasts
//!   for the lifetime of the service and of every view sharing its selector.
//! - **Entity create/update** propagate database failures without fallback.
//! - **Photos** exist only in the database.

use ecclesia_api_client::{CatalogApi, DioceseQuery, EntityQuery, RequestContext};
use ecclesia_db_client::{CatalogStore, DbError};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::backend::{BackendPreference, BackendSelector};
use crate::error::{CatalogError, Result};
use crate::filter::{DioceseFilter, EntityFilter};
use crate::input::*;
use crate::model::*;

/// Maximum results of a free-text search
const SEARCH_LIMIT: usize = 20;

/// Catalog access over a database and a REST API
#[derive(Clone)]
pub struct DataService {
    database: Option<Arc<dyn CatalogStore>>,
    api: Option<Arc<dyn CatalogApi>>,
    selector: Arc<BackendSelector>,
    context: RequestContext,
}

impl DataService {
    /// Create a service preferring the database
    pub fn new(database: Option<Arc<dyn CatalogStore>>, api: Option<Arc<dyn CatalogApi>>) -> Self {
        Self {
            database,
            api,
            selector: Arc::new(BackendSelector::default()),
            context: RequestContext::default(),
        }
    }

    /// Set the initial backend preference
    pub fn with_preference(mut self, preference: BackendPreference) -> Self {
        self.selector = Arc::new(BackendSelector::new(preference));
        self
    }

    /// View of this service whose REST calls use `context`.
    ///
    /// The view shares the backend selector, so a demotion through either
    /// is seen by both.
    pub fn with_context(&self, context: RequestContext) -> Self {
        Self {
            context,
            ..self.clone()
        }
    }

    pub fn preference(&self) -> BackendPreference {
        self.selector.preference()
    }

    pub fn has_database(&self) -> bool {
        self.database.is_some()
    }

    pub fn has_api(&self) -> bool {
        self.api.is_some()
    }

    // ==================== Routing ====================

    /// Database, if configured and still preferred
    fn primary(&self) -> Option<&dyn CatalogStore> {
        match self.selector.preference() {
            BackendPreference::PreferPrimary => self.database.as_deref(),
            BackendPreference::PreferSecondary => None,
        }
    }

    /// REST API, or `BackendUnavailable` explaining why nothing is left
    fn api(&self, operation: &str) -> Result<&dyn CatalogApi> {
        self.api.as_deref().ok_or_else(|| {
            let reason = if self.database.is_none() {
                "neither a database nor a REST API is configured"
            } else if self.preference() == BackendPreference::PreferSecondary {
                "database was abandoned after a failed write and no REST API is configured"
            } else {
                "database request failed and no REST API is configured"
            };
            tracing::error!(operation, reason, "No backend available");
            CatalogError::BackendUnavailable(reason.to_string())
        })
    }

    /// Database regardless of preference, for data only it holds
    fn database_only(&self, operation: &str) -> Result<&dyn CatalogStore> {
        self.database.as_deref().ok_or_else(|| {
            tracing::error!(operation, "Operation requires a database");
            CatalogError::BackendUnavailable(format!("{} requires a database", operation))
        })
    }

    fn read_failed(&self, operation: &str, id: Option<i64>, error: &DbError) {
        tracing::warn!(
            operation,
            entity_id = ?id,
            error = %error,
            "Database read failed, falling back to REST API"
        );
    }

    /// Demote the database after a failed write, unless the row was missing
    fn write_failed(&self, operation: &str, id: Option<i64>, error: DbError) -> Result<()> {
        if matches!(error, DbError::NotFound(_)) {
            return Err(error.into());
        }
        tracing::error!(
            operation,
            entity_id = ?id,
            error = %error,
            "Database write failed, retrying on REST API"
        );
        if self.selector.demote() {
            tracing::warn!(operation, "Database abandoned; REST API is now preferred");
        }
        Ok(())
    }

    // ==================== Entities ====================

    /// Entities matching every criterion of `filter`
    pub async fn list_entities(&self, filter: &EntityFilter) -> Result<Vec<EcclesiasticalEntity>> {
        if let Some(db) = self.primary() {
            match db.list_entities().await {
                Ok(rows) => return Ok(filter.apply(rows.into_iter().map(Into::into))),
                Err(e) => self.read_failed("list_entities", None, &e),
            }
        }

        let page = self
            .api("list_entities")?
            .list_entities(&filter.to_query(), &self.context)
            .await?;
        Ok(filter.apply(page.entidades.into_iter().map(Into::into)))
    }

    /// Entity by id; `Ok(None)` when it does not exist
    pub async fn get_entity(&self, id: i64) -> Result<Option<EcclesiasticalEntity>> {
        if let Some(db) = self.primary() {
            match db.get_entity(id).await {
                Ok(row) => return Ok(row.map(Into::into)),
                Err(e) => self.read_failed("get_entity", Some(id), &e),
            }
        }

        let api = self.api("get_entity")?;
        match api.get_entity(id, &self.context).await {
            Ok(entity) => Ok(Some(entity.into())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                tracing::warn!(
                    entity_id = id,
                    error = %e,
                    "Entity lookup failed, scanning entity list"
                );
                let page = api.list_entities(&EntityQuery::default(), &self.context).await?;
                Ok(page
                    .entidades
                    .into_iter()
                    .find(|entity| entity.id == id)
                    .map(Into::into))
            }
        }
    }

    /// Case-insensitive match on name, city or address
    pub async fn search_entities(&self, term: &str) -> Result<Vec<EcclesiasticalEntity>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(db) = self.primary() {
            match db.search_entities(term).await {
                Ok(rows) => return Ok(rows.into_iter().map(Into::into).collect()),
                Err(e) => self.read_failed("search_entities", None, &e),
            }
        }

        let page = self
            .api("search_entities")?
            .list_entities(&EntityQuery::default(), &self.context)
            .await?;
        let needle = term.to_lowercase();
        Ok(page
            .entidades
            .into_iter()
            .map(EcclesiasticalEntity::from)
            .filter(|e| {
                [&e.name, &e.city, &e.address]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .take(SEARCH_LIMIT)
            .collect())
    }

    /// Create an entity. Database failures are returned, not retried.
    pub async fn create_entity(&self, input: &NewEntity) -> Result<EcclesiasticalEntity> {
        input.validate()?;
        if let Some(db) = self.primary() {
            let row = db.create_entity(&input.to_row_input()).await.map_err(|e| {
                tracing::error!(operation = "create_entity", error = %e, "Database write failed");
                CatalogError::from(e)
            })?;
            return Ok(row.into());
        }

        let entity = self
            .api("create_entity")?
            .create_entity(&input.to_api_input(), &self.context)
            .await?;
        Ok(entity.into())
    }

    /// Update an entity. Database failures are returned, not retried.
    pub async fn update_entity(&self, id: i64, patch: &EntityPatch) -> Result<EcclesiasticalEntity> {
        patch.validate()?;
        if let Some(db) = self.primary() {
            let row = db.update_entity(id, &patch.to_row_input()).await.map_err(|e| {
                tracing::error!(operation = "update_entity", entity_id = id, error = %e, "Database write failed");
                CatalogError::from(e)
            })?;
            return Ok(row.into());
        }

        let entity = self
            .api("update_entity")?
            .update_entity(id, &patch.to_api_input(), &self.context)
            .await?;
        Ok(entity.into())
    }

    /// Delete an entity; `Ok(false)` when it did not exist
    pub async fn delete_entity(&self, id: i64) -> Result<bool> {
        if let Some(db) = self.primary() {
            match db.delete_entity(id).await {
                Ok(deleted) => return Ok(deleted),
                Err(e) => self.write_failed("delete_entity", Some(id), e)?,
            }
        }

        deleted(self.api("delete_entity")?.delete_entity(id, &self.context).await)
    }

    // ==================== Dioceses ====================

    pub async fn list_dioceses(&self, filter: &DioceseFilter) -> Result<Vec<Diocese>> {
        if let Some(db) = self.primary() {
            match db.list_dioceses().await {
                Ok(rows) => return Ok(filter.apply(rows.into_iter().map(Into::into))),
                Err(e) => self.read_failed("list_dioceses", None, &e),
            }
        }

        let page = self
            .api("list_dioceses")?
            .list_dioceses(&filter.to_query(), &self.context)
            .await?;
        Ok(filter.apply(page.dioceses.into_iter().map(Into::into)))
    }

    /// Diocese by id; `Ok(None)` when it does not exist
    pub async fn get_diocese(&self, id: i64) -> Result<Option<Diocese>> {
        if let Some(db) = self.primary() {
            match db.get_diocese(id).await {
                Ok(row) => return Ok(row.map(Into::into)),
                Err(e) => self.read_failed("get_diocese", Some(id), &e),
            }
        }

        match self.api("get_diocese")?.get_diocese(id, &self.context).await {
            Ok(diocese) => Ok(Some(diocese.into())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn create_diocese(&self, input: &NewDiocese) -> Result<Diocese> {
        input.validate()?;
        if let Some(db) = self.primary() {
            match db.create_diocese(&input.to_row_input()).await {
                Ok(row) => return Ok(row.into()),
                Err(e) => self.write_failed("create_diocese", None, e)?,
            }
        }

        let diocese = self
            .api("create_diocese")?
            .create_diocese(&input.to_api_input(), &self.context)
            .await?;
        Ok(diocese.into())
    }

    pub async fn update_diocese(&self, id: i64, patch: &DiocesePatch) -> Result<Diocese> {
        patch.validate()?;
        if let Some(db) = self.primary() {
            match db.update_diocese(id, &patch.to_row_input()).await {
                Ok(row) => return Ok(row.into()),
                Err(e) => self.write_failed("update_diocese", Some(id), e)?,
            }
        }

        let diocese = self
            .api("update_diocese")?
            .update_diocese(id, &patch.to_api_input(), &self.context)
            .await?;
        Ok(diocese.into())
    }

    pub async fn delete_diocese(&self, id: i64) -> Result<bool> {
        if let Some(db) = self.primary() {
            match db.delete_diocese(id).await {
                Ok(deleted) => return Ok(deleted),
                Err(e) => self.write_failed("delete_diocese", Some(id), e)?,
            }
        }

        deleted(self.api("delete_diocese")?.delete_diocese(id, &self.context).await)
    }

    // ==================== Clergy ====================

    pub async fn list_clergy(&self) -> Result<Vec<Clergy>> {
        if let Some(db) = self.primary() {
            match db.list_clergy().await {
                Ok(rows) => return Ok(rows.into_iter().map(Into::into).collect()),
                Err(e) => self.read_failed("list_clergy", None, &e),
            }
        }

        let page = self.api("list_clergy")?.list_clergy(&self.context).await?;
        Ok(page.clero.into_iter().map(Into::into).collect())
    }

    /// Clergy member by id; `Ok(None)` when it does not exist
    pub async fn get_clergy(&self, id: i64) -> Result<Option<Clergy>> {
        if let Some(db) = self.primary() {
            match db.get_clergy(id).await {
                Ok(row) => return Ok(row.map(Into::into)),
                Err(e) => self.read_failed("get_clergy", Some(id), &e),
            }
        }

        match self.api("get_clergy")?.get_clergy(id, &self.context).await {
            Ok(clergy) => Ok(Some(clergy.into())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn create_clergy(&self, input: &NewClergy) -> Result<Clergy> {
        input.validate()?;
        if let Some(db) = self.primary() {
            match db.create_clergy(&input.to_row_input()).await {
                Ok(row) => return Ok(row.into()),
                Err(e) => self.write_failed("create_clergy", None, e)?,
            }
        }

        let clergy = self
            .api("create_clergy")?
            .create_clergy(&input.to_api_input(), &self.context)
            .await?;
        Ok(clergy.into())
    }

    pub async fn update_clergy(&self, id: i64, patch: &ClergyPatch) -> Result<Clergy> {
        patch.validate()?;
        if let Some(db) = self.primary() {
            match db.update_clergy(id, &patch.to_row_input()).await {
                Ok(row) => return Ok(row.into()),
                Err(e) => self.write_failed("update_clergy", Some(id), e)?,
            }
        }

        let clergy = self
            .api("update_clergy")?
            .update_clergy(id, &patch.to_api_input(), &self.context)
            .await?;
        Ok(clergy.into())
    }

    pub async fn delete_clergy(&self, id: i64) -> Result<bool> {
        if let Some(db) = self.primary() {
            match db.delete_clergy(id).await {
                Ok(deleted) => return Ok(deleted),
                Err(e) => self.write_failed("delete_clergy", Some(id), e)?,
            }
        }

        deleted(self.api("delete_clergy")?.delete_clergy(id, &self.context).await)
    }

    // ==================== Photos ====================

    /// Photos of an entity, sorted by `order`
    pub async fn list_photos(&self, entity_id: i64) -> Result<Vec<Photo>> {
        let mut photos: Vec<Photo> = self
            .database_only("list_photos")?
            .list_photos(entity_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        photos.sort_by_key(|p| p.order);
        Ok(photos)
    }

    /// Lowest-ordered photo of an entity
    pub async fn cover_photo(&self, entity_id: i64) -> Result<Option<Photo>> {
        let row = self
            .database_only("cover_photo")?
            .cover_photo(entity_id)
            .await?;
        Ok(row.map(Into::into))
    }

    pub async fn create_photo(&self, input: &NewPhoto) -> Result<Photo> {
        input.validate()?;
        let row = self
            .database_only("create_photo")?
            .create_photo(&input.to_row_input())
            .await?;
        Ok(row.into())
    }

    pub async fn update_photo(&self, id: i64, patch: &PhotoPatch) -> Result<Photo> {
        patch.validate()?;
        let row = self
            .database_only("update_photo")?
            .update_photo(id, &patch.to_row_input())
            .await?;
        Ok(row.into())
    }

    pub async fn delete_photo(&self, id: i64) -> Result<bool> {
        Ok(self.database_only("delete_photo")?.delete_photo(id).await?)
    }

    // ==================== Reference Data ====================

    /// States with at least one entity, sorted
    pub async fn list_states(&self) -> Result<Vec<String>> {
        if let Some(db) = self.primary() {
            match db.list_states().await {
                Ok(states) => return Ok(states),
                Err(e) => self.read_failed("list_states", None, &e),
            }
        }

        let states = self.api("list_states")?.list_states(&self.context).await?;
        Ok(sorted_distinct(states))
    }

    /// Cities with at least one entity, optionally within one state, sorted
    pub async fn list_cities(&self, state: Option<&str>) -> Result<Vec<String>> {
        let state = state.filter(|s| !s.is_empty());
        if let Some(db) = self.primary() {
            match db.list_cities(state).await {
                Ok(cities) => return Ok(cities),
                Err(e) => self.read_failed("list_cities", None, &e),
            }
        }

        let filter = EntityFilter {
            state: state.map(str::to_string),
            ..Default::default()
        };
        let page = self
            .api("list_cities")?
            .list_entities(&filter.to_query(), &self.context)
            .await?;
        let cities = filter
            .apply(page.entidades.into_iter().map(Into::into))
            .into_iter()
            .map(|e| e.city);
        Ok(sorted_distinct(cities))
    }

    pub async fn list_kinds(&self) -> Result<Vec<EntityKind>> {
        if let Some(db) = self.primary() {
            return Ok(db.kinds().into_iter().map(EntityKind::from).collect());
        }

        let kinds = self.api("list_kinds")?.list_kinds(&self.context).await?;
        Ok(kinds.into_iter().map(EntityKind::from).collect())
    }

    pub async fn list_jurisdictions(&self) -> Result<Vec<Jurisdiction>> {
        if let Some(db) = self.primary() {
            return Ok(db.jurisdictions().into_iter().map(Jurisdiction::from).collect());
        }

        let jurisdictions = self
            .api("list_jurisdictions")?
            .list_jurisdictions(&self.context)
            .await?;
        Ok(jurisdictions.into_iter().map(Jurisdiction::from).collect())
    }

    /// Totals of entities, dioceses and clergy
    pub async fn stats(&self) -> Result<CatalogStats> {
        if let Some(db) = self.primary() {
            match db.counts().await {
                Ok(counts) => {
                    return Ok(CatalogStats {
                        entities: counts.entities,
                        dioceses: counts.dioceses,
                        clergy: counts.clergy,
                    })
                }
                Err(e) => self.read_failed("stats", None, &e),
            }
        }

        let api = self.api("stats")?;
        let entity_query = EntityQuery::default();
        let diocese_query = DioceseQuery::default();
        let (entities, dioceses, clergy) = tokio::try_join!(
            api.list_entities(&entity_query, &self.context),
            api.list_dioceses(&diocese_query, &self.context),
            api.list_clergy(&self.context),
        )?;
        Ok(CatalogStats {
            entities: entities.total,
            dioceses: dioceses.total,
            clergy: clergy.total,
        })
    }

    /// Probe both backends. Never changes the preference.
    pub async fn health(&self) -> HealthReport {
        let database = async {
            match self.database.as_deref() {
                None => BackendStatus::NotConfigured,
                Some(db) => match db.ping().await {
                    Ok(()) => BackendStatus::Available,
                    Err(e) => BackendStatus::Unavailable {
                        reason: e.to_string(),
                    },
                },
            }
        };
        let api = async {
            match self.api.as_deref() {
                None => BackendStatus::NotConfigured,
                Some(api) => match api.health(&self.context).await {
                    Ok(_) => BackendStatus::Available,
                    Err(e) => BackendStatus::Unavailable {
                        reason: e.to_string(),
                    },
                },
            }
        };
        let (database, api) = tokio::join!(database, api);

        tracing::debug!(?database, ?api, "Health check complete");
        HealthReport {
            preference: self.preference(),
            database,
            api,
        }
    }
}

/// REST deletes signal a missing id with 404
fn deleted(result: ecclesia_api_client::Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn sorted_distinct(values: impl IntoIterator<Item = String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockApi, MockStore};
    use ecclesia_api_client::{ApiDiocese, ApiDioceseRef, ApiEntity};
    use ecclesia_db_client::{ClergyRow, DioceseRow, EntityRow, PhotoRow};

    fn entity_row(id: i64, state: &str, city: &str, kind: &str) -> EntityRow {
        EntityRow {
            id,
            id_diocese: 1,
            id_reitor: None,
            nome: format!("Entidade {}", id),
            tipo: kind.to_string(),
            endereco: None,
            cep: None,
            cidade: Some(city.to_string()),
            estado: Some(state.to_string()),
            telefone: None,
            email: None,
            website: None,
            descricao: None,
            latitude: None,
            longitude: None,
            diocese: None,
            clero: None,
            fotosentidade: None,
        }
    }

    fn api_entity(id: i64, state: &str, city: &str, kind: &str) -> ApiEntity {
        ApiEntity {
            id,
            id_diocese: Some(1),
            nome: format!("Entidade {}", id),
            tipo: kind.to_string(),
            endereco: None,
            cidade: Some(city.to_string()),
            estado: Some(state.to_string()),
            cep: None,
            telefone: None,
            email: None,
            website: None,
            descricao: None,
            latitude: None,
            longitude: None,
            url_foto: None,
            diocese: Some(ApiDioceseRef {
                id: 1,
                nome: "Diocese de São Paulo".to_string(),
                jurisdicao: "Patriarcado de Antioquia".to_string(),
                loc_sede: None,
            }),
            reitor: None,
            fotos: None,
        }
    }

    fn sample_rows() -> Vec<EntityRow> {
        vec![
            entity_row(1, "SP", "São Paulo", "Catedral"),
            entity_row(2, "SP", "Santos", "Paroquia"),
            entity_row(3, "RJ", "Niterói", "Catedral"),
        ]
    }

    fn sample_api_entities() -> Vec<ApiEntity> {
        vec![
            api_entity(1, "SP", "São Paulo", "Catedral"),
            api_entity(2, "SP", "Santos", "Paroquia"),
            api_entity(3, "RJ", "Niterói", "Catedral"),
        ]
    }

    fn service(store: Arc<MockStore>, api: Arc<MockApi>) -> DataService {
        DataService::new(Some(store), Some(api))
    }

    fn sp_cathedrals() -> EntityFilter {
        EntityFilter::default()
            .with_state("SP")
            .with_kind(EntityKind::Cathedral)
    }

    // ==================== Reads ====================

    #[tokio::test]
    async fn test_filter_conjunction_on_database_path() {
        let store = Arc::new(MockStore::new().with_entities(sample_rows()));
        let api = Arc::new(MockApi::new());
        let service = service(store.clone(), api.clone());

        let entities = service.list_entities(&sp_cathedrals()).await.unwrap();
        let ids: Vec<i64> = entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_filter_conjunction_on_rest_path() {
        let store = Arc::new(MockStore::new().with_failing(true));
        let api = Arc::new(MockApi::new().with_entities(sample_api_entities()));
        let service = service(store, api.clone());

        let entities = service.list_entities(&sp_cathedrals()).await.unwrap();
        let ids: Vec<i64> = entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1]);

        let query = api.last_entity_query().unwrap();
        assert_eq!(query.estado.as_deref(), Some("SP"));
        assert_eq!(query.tipo.as_deref(), Some("Catedral"));
    }

    #[tokio::test]
    async fn test_read_failure_does_not_demote() {
        let store = Arc::new(MockStore::new().with_failing(true));
        let api = Arc::new(MockApi::new().with_entities(sample_api_entities()));
        let service = service(store.clone(), api);

        service.list_entities(&EntityFilter::default()).await.unwrap();
        assert_eq!(service.preference(), BackendPreference::PreferPrimary);

        store.set_failing(false);
        service.list_entities(&EntityFilter::default()).await.unwrap();
        assert_eq!(store.call_count(), 2);
    }

    #[tokio::test]
    async fn test_get_entity_missing_is_none_on_both_paths() {
        let store = Arc::new(MockStore::new().with_entities(sample_rows()));
        let api = Arc::new(MockApi::new().with_entities(sample_api_entities()));
        let db_first = service(store.clone(), api.clone());
        assert!(db_first.get_entity(99).await.unwrap().is_none());
        assert_eq!(api.call_count(), 0);

        store.set_failing(true);
        assert!(db_first.get_entity(99).await.unwrap().is_none());
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_get_entity_scans_list_when_lookup_fails() {
        let store = Arc::new(MockStore::new().with_failing(true));
        let api = Arc::new(
            MockApi::new()
                .with_entities(sample_api_entities())
                .with_failing_lookups(true),
        );
        let service = service(store, api.clone());

        let entity = service.get_entity(2).await.unwrap().unwrap();
        assert_eq!(entity.city, "Santos");
        assert_eq!(
            entity.jurisdiction(),
            Some(&Jurisdiction::PatriarchateOfAntioch)
        );
        // Lookup, then list
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_get_entity_scan_error_propagates() {
        let store = Arc::new(MockStore::new().with_failing(true));
        let api = Arc::new(MockApi::new().with_failing(true));
        let service = service(store, api);

        let err = service.get_entity(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
    }

    #[tokio::test]
    async fn test_get_diocese_and_clergy_absent_is_none() {
        let store = Arc::new(MockStore::new().with_failing(true));
        let api = Arc::new(MockApi::new());
        let service = service(store, api);

        assert!(service.get_diocese(5).await.unwrap().is_none());
        assert!(service.get_clergy(5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_falls_back_to_client_side_match() {
        let store = Arc::new(MockStore::new().with_failing(true));
        let api = Arc::new(MockApi::new().with_entities(sample_api_entities()));
        let service = service(store, api);

        let hits = service.search_entities("  niterói ").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
        assert!(service.search_entities("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cities_fallback_scoped_by_state() {
        let mut entities = sample_api_entities();
        entities.push(api_entity(4, "SP", "Santos", "Capela"));
        entities.push(api_entity(5, "SP", "", "Capela"));
        entities.push(api_entity(6, "SP", "Santos ", "Paroquia"));
        let store = Arc::new(MockStore::new().with_failing(true));
        let api = Arc::new(MockApi::new().with_entities(entities));
        let service = service(store, api);

        let cities = service.list_cities(Some("SP")).await.unwrap();
        assert_eq!(cities, vec!["Santos".to_string(), "São Paulo".to_string()]);
    }

    #[test]
    fn test_sorted_distinct_trims_before_deduplicating() {
        let values = ["Santos ", "Santos", " ", "Campinas"].map(String::from);
        assert_eq!(sorted_distinct(values), vec!["Campinas", "Santos"]);
    }

    #[tokio::test]
    async fn test_cities_and_states_from_database() {
        let store = Arc::new(MockStore::new().with_entities(sample_rows()));
        let service = DataService::new(Some(store), None);

        assert_eq!(service.list_states().await.unwrap(), vec!["RJ", "SP"]);
        assert_eq!(
            service.list_cities(Some("SP")).await.unwrap(),
            vec!["Santos", "São Paulo"]
        );
    }

    #[tokio::test]
    async fn test_stats_on_both_paths() {
        let store = Arc::new(
            MockStore::new()
                .with_entities(sample_rows())
                .with_clergy(vec![ClergyRow {
                    id: 1,
                    nome_completo: "Pe. Tiago".into(),
                    titulo: None,
                    id_diocese_auxiliar: None,
                    email: None,
                }]),
        );
        let api = Arc::new(
            MockApi::new()
                .with_entities(sample_api_entities())
                .with_dioceses(vec![ApiDiocese {
                    id: 1,
                    nome: "Diocese".into(),
                    jurisdicao: "Patriarcado de Moscou".into(),
                    loc_sede: None,
                    bispo_titular: None,
                    bispos_auxiliares: None,
                }]),
        );
        let service = service(store.clone(), api);

        let stats = service.stats().await.unwrap();
        assert_eq!((stats.entities, stats.dioceses, stats.clergy), (3, 0, 1));

        store.set_failing(true);
        let stats = service.stats().await.unwrap();
        assert_eq!((stats.entities, stats.dioceses, stats.clergy), (3, 1, 0));
    }

    #[tokio::test]
    async fn test_vocabularies_from_both_paths() {
        let db_only = DataService::new(Some(Arc::new(MockStore::new())), None);
        assert_eq!(db_only.list_kinds().await.unwrap(), EntityKind::known().to_vec());

        let api_only = DataService::new(None, Some(Arc::new(MockApi::new())));
        assert_eq!(
            api_only.list_jurisdictions().await.unwrap(),
            Jurisdiction::known().to_vec()
        );
    }

    #[tokio::test]
    async fn test_no_backend_configured() {
        let service = DataService::new(None, None);
        let err = service.list_clergy().await.unwrap_err();
        match err {
            CatalogError::BackendUnavailable(reason) => {
                assert_eq!(reason, "neither a database nor a REST API is configured")
            }
            other => panic!("expected BackendUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_database_failure_without_api() {
        let store = Arc::new(MockStore::new().with_failing(true));
        let service = DataService::new(Some(store), None);

        let err = service.list_dioceses(&DioceseFilter::default()).await.unwrap_err();
        assert!(
            matches!(err, CatalogError::BackendUnavailable(ref r) if r.starts_with("database request failed"))
        );
    }

    // ==================== Writes ====================

    #[tokio::test]
    async fn test_failed_write_demotes_and_retries_on_api() {
        let store = Arc::new(MockStore::new().with_failing(true));
        let api = Arc::new(MockApi::new());
        let service = service(store.clone(), api.clone());

        let diocese = service
            .create_diocese(&NewDiocese::new("Diocese de Curitiba", Jurisdiction::PatriarchateOfSerbia))
            .await
            .unwrap();
        assert_eq!(diocese.jurisdiction, Jurisdiction::PatriarchateOfSerbia);
        assert_eq!(service.preference(), BackendPreference::PreferSecondary);

        // The database is no longer consulted, even for reads
        store.set_failing(false);
        let calls = store.call_count();
        service.list_clergy().await.unwrap();
        assert_eq!(store.call_count(), calls);
    }

    #[tokio::test]
    async fn test_demotion_is_shared_with_context_views() {
        let store = Arc::new(MockStore::new().with_failing(true));
        let api = Arc::new(MockApi::new());
        let service = service(store, api);
        let view = service.with_context(RequestContext::new());

        view.create_clergy(&NewClergy::new("Pe. Basílio")).await.unwrap();
        assert_eq!(service.preference(), BackendPreference::PreferSecondary);
    }

    #[tokio::test]
    async fn test_entity_create_propagates_database_failure() {
        let store = Arc::new(MockStore::new().with_failing(true));
        let api = Arc::new(MockApi::new());
        let service = service(store, api.clone());

        let err = service
            .create_entity(&NewEntity::new(1, "Capela Santa Ana", EntityKind::Chapel))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));
        assert_eq!(api.call_count(), 0);
        assert_eq!(service.preference(), BackendPreference::PreferPrimary);
    }

    #[tokio::test]
    async fn test_entity_create_goes_to_api_once_demoted() {
        let api = Arc::new(MockApi::new());
        let service = DataService::new(Some(Arc::new(MockStore::new())), Some(api.clone()))
            .with_preference(BackendPreference::PreferSecondary);

        let entity = service
            .create_entity(&NewEntity::new(1, "Missão São Pedro", EntityKind::Mission))
            .await
            .unwrap();
        assert_eq!(entity.kind, EntityKind::Mission);
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_validation_runs_before_dispatch() {
        let store = Arc::new(MockStore::new());
        let service = DataService::new(Some(store.clone()), None);

        let err = service
            .create_diocese(&NewDiocese::new("Exarcado", Jurisdiction::Unmapped("X".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found_without_demotion() {
        let store = Arc::new(MockStore::new());
        let api = Arc::new(MockApi::new());
        let service = service(store, api.clone());

        let patch = DiocesePatch {
            name: Some("Nova".into()),
            ..Default::default()
        };
        let err = service.update_diocese(42, &patch).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.preference(), BackendPreference::PreferPrimary);
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_false_on_both_backends() {
        let store = Arc::new(MockStore::new().with_entities(sample_rows()));
        let api = Arc::new(MockApi::new().with_entities(sample_api_entities()));
        let service = service(store.clone(), api);

        assert!(service.delete_entity(1).await.unwrap());
        assert!(!service.delete_entity(1).await.unwrap());

        store.set_failing(true);
        assert!(service.delete_entity(3).await.unwrap());
        assert!(!service.delete_entity(99).await.unwrap());
        assert_eq!(service.preference(), BackendPreference::PreferSecondary);
    }

    // ==================== Photos ====================

    #[tokio::test]
    async fn test_photos_sorted_and_cover_is_first() {
        let photos = vec![
            PhotoRow {
                id: 1,
                id_entidade: 7,
                url_foto: "https://cdn.example.org/b.jpg".into(),
                legenda: None,
                ordem: 2,
            },
            PhotoRow {
                id: 2,
                id_entidade: 7,
                url_foto: "https://cdn.example.org/a.jpg".into(),
                legenda: Some("Fachada".into()),
                ordem: 1,
            },
        ];
        let service = DataService::new(Some(Arc::new(MockStore::new().with_photos(photos))), None);

        let listed = service.list_photos(7).await.unwrap();
        assert_eq!(listed.iter().map(|p| p.order).collect::<Vec<_>>(), vec![1, 2]);

        let cover = service.cover_photo(7).await.unwrap().unwrap();
        assert_eq!(cover.url, listed[0].url);
        assert!(service.cover_photo(8).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_photo_writes_require_database() {
        let service = DataService::new(None, Some(Arc::new(MockApi::new())));
        let photo = NewPhoto {
            entity_id: 1,
            url: "https://cdn.example.org/a.jpg".into(),
            caption: None,
            order: 0,
        };
        let err = service.create_photo(&photo).await.unwrap_err();
        assert!(matches!(err, CatalogError::BackendUnavailable(_)));
    }

    #[tokio::test]
    async fn test_photo_crud_on_database() {
        let service = DataService::new(Some(Arc::new(MockStore::new())), None);
        let created = service
            .create_photo(&NewPhoto {
                entity_id: 3,
                url: "https://cdn.example.org/a.jpg".into(),
                caption: None,
                order: 5,
            })
            .await
            .unwrap();
        assert_eq!(created.entity_id, 3);

        let updated = service
            .update_photo(
                created.id,
                &PhotoPatch {
                    order: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.order, 1);
        assert!(service.delete_photo(created.id).await.unwrap());
        assert!(!service.delete_photo(created.id).await.unwrap());
    }

    // ==================== Health ====================

    #[tokio::test]
    async fn test_health_reports_each_backend() {
        let store = Arc::new(MockStore::new().with_failing(true));
        let service = DataService::new(Some(store), None);

        let report = service.health().await;
        assert!(matches!(report.database, BackendStatus::Unavailable { .. }));
        assert_eq!(report.api, BackendStatus::NotConfigured);
        assert_eq!(report.preference, BackendPreference::PreferPrimary);
        assert!(!report.is_healthy());
    }

    #[tokio::test]
    async fn test_db_diocese_rows_map_through_service() {
        let store = Arc::new(MockStore::new().with_dioceses(vec![DioceseRow {
            id: 1,
            nome: "Diocese de Varsóvia".into(),
            jurisdicao: "IgrejaAutocefalaDoPolonia".into(),
            id_bispo_titular: None,
            loc_sede: None,
            bispo_titular: None,
            bispos_auxiliares: None,
        }]));
        let service = DataService::new(Some(store), None);

        let filter = DioceseFilter {
            jurisdiction: Some(Jurisdiction::PolishAutocephalousChurch),
        };
        let dioceses = service.list_dioceses(&filter).await.unwrap();
        assert_eq!(dioceses.len(), 1);
        assert_eq!(dioceses[0].bishop, "");
    }
}
