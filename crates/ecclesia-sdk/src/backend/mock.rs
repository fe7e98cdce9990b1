//! In-memory backends for testing.

use async_trait::async_trait;
use ecclesia_api_client::{
    ApiClergy, ApiClergyInput, ApiDiocese, ApiDioceseInput, ApiEntity, ApiEntityInput, ApiError,
    CatalogApi, ClergyList, DioceseList, DioceseQuery, EntityList, EntityQuery, HealthStatus,
    RequestContext,
};
use ecclesia_db_client::{
    CatalogStore, ClergyInput, ClergyRow, DbError, DioceseInput, DioceseRow, EntityInput,
    EntityRow, PhotoInput, PhotoRow, TableCounts,
};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

// ============================================================================
// Database
// ============================================================================

#[derive(Debug, Default)]
struct Tables {
    entities: Vec<EntityRow>,
    dioceses: Vec<DioceseRow>,
    clergy: Vec<ClergyRow>,
    photos: Vec<PhotoRow>,
}

/// In-memory database backend.
///
/// While failing, every operation returns a driver error. Rows are stored
/// as given; relations are not resolved.
#[derive(Debug, Default)]
pub struct MockStore {
    tables: Mutex<Tables>,
    failing: AtomicBool,
    call_count: AtomicU32,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(self, rows: Vec<EntityRow>) -> Self {
        lock(&self.tables).entities = rows;
        self
    }

    pub fn with_dioceses(self, rows: Vec<DioceseRow>) -> Self {
        lock(&self.tables).dioceses = rows;
        self
    }

    pub fn with_clergy(self, rows: Vec<ClergyRow>) -> Self {
        lock(&self.tables).clergy = rows;
        self
    }

    pub fn with_photos(self, rows: Vec<PhotoRow>) -> Self {
        lock(&self.tables).photos = rows;
        self
    }

    /// Set failure mode.
    pub fn with_failing(self, failing: bool) -> Self {
        self.set_failing(failing);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get the number of operations served or refused.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Count the call and fail if configured to
    fn enter(&self) -> Result<(), DbError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Driver {
                status: 503,
                code: None,
                message: "mock database unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn distinct<'a>(values: impl Iterator<Item = Option<&'a String>>) -> Vec<String> {
        values
            .flatten()
            .filter(|v| !v.is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn apply_entity(row: &mut EntityRow, input: &EntityInput) {
    if let Some(id) = input.id_diocese {
        row.id_diocese = id;
    }
    if input.id_reitor.is_some() {
        row.id_reitor = input.id_reitor;
    }
    if let Some(ref nome) = input.nome {
        row.nome = nome.clone();
    }
    if let Some(ref tipo) = input.tipo {
        row.tipo = tipo.clone();
    }
    macro_rules! copy {
        ($($field:ident),*) => {
            $(if input.$field.is_some() {
                row.$field = input.$field.clone();
            })*
        };
    }
    copy!(endereco, cep, cidade, estado, telefone, email, website, descricao, latitude, longitude);
}

fn apply_diocese(row: &mut DioceseRow, input: &DioceseInput) {
    if let Some(ref nome) = input.nome {
        row.nome = nome.clone();
    }
    if let Some(ref jurisdicao) = input.jurisdicao {
        row.jurisdicao = jurisdicao.clone();
    }
    if input.id_bispo_titular.is_some() {
        row.id_bispo_titular = input.id_bispo_titular;
    }
    if input.loc_sede.is_some() {
        row.loc_sede = input.loc_sede.clone();
    }
}

fn apply_clergy(row: &mut ClergyRow, input: &ClergyInput) {
    if let Some(ref nome) = input.nome_completo {
        row.nome_completo = nome.clone();
    }
    if input.titulo.is_some() {
        row.titulo = input.titulo.clone();
    }
    if input.id_diocese_auxiliar.is_some() {
        row.id_diocese_auxiliar = input.id_diocese_auxiliar;
    }
    if input.email.is_some() {
        row.email = input.email.clone();
    }
}

fn apply_photo(row: &mut PhotoRow, input: &PhotoInput) {
    if let Some(id) = input.id_entidade {
        row.id_entidade = id;
    }
    if let Some(ref url) = input.url_foto {
        row.url_foto = url.clone();
    }
    if input.legenda.is_some() {
        row.legenda = input.legenda.clone();
    }
    if let Some(ordem) = input.ordem {
        row.ordem = ordem;
    }
}

fn missing(table: &str, id: i64) -> DbError {
    DbError::NotFound(format!("{} {}", table, id))
}

#[async_trait]
impl CatalogStore for MockStore {
    async fn ping(&self) -> Result<(), DbError> {
        self.enter()
    }

    async fn list_entities(&self) -> Result<Vec<EntityRow>, DbError> {
        self.enter()?;
        Ok(lock(&self.tables).entities.clone())
    }

    async fn get_entity(&self, id: i64) -> Result<Option<EntityRow>, DbError> {
        self.enter()?;
        Ok(lock(&self.tables).entities.iter().find(|e| e.id == id).cloned())
    }

    async fn search_entities(&self, term: &str) -> Result<Vec<EntityRow>, DbError> {
        self.enter()?;
        let term = term.to_lowercase();
        let hit = |v: &Option<String>| v.as_deref().is_some_and(|v| v.to_lowercase().contains(&term));
        Ok(lock(&self.tables)
            .entities
            .iter()
            .filter(|e| e.nome.to_lowercase().contains(&term) || hit(&e.cidade) || hit(&e.endereco))
            .take(ecclesia_db_client::schema::SEARCH_LIMIT)
            .cloned()
            .collect())
    }

    async fn create_entity(&self, input: &EntityInput) -> Result<EntityRow, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let mut row = EntityRow {
            id: next_id(tables.entities.iter().map(|e| e.id)),
            id_diocese: 0,
            id_reitor: None,
            nome: String::new(),
            tipo: String::new(),
            endereco: None,
            cep: None,
            cidade: None,
            estado: None,
            telefone: None,
            email: None,
            website: None,
            descricao: None,
            latitude: None,
            longitude: None,
            diocese: None,
            clero: None,
            fotosentidade: None,
        };
        apply_entity(&mut row, input);
        tables.entities.push(row.clone());
        Ok(row)
    }

    async fn update_entity(&self, id: i64, input: &EntityInput) -> Result<EntityRow, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let row = tables
            .entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| missing("entidadeeclesiastica", id))?;
        apply_entity(row, input);
        Ok(row.clone())
    }

    async fn delete_entity(&self, id: i64) -> Result<bool, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let before = tables.entities.len();
        tables.entities.retain(|e| e.id != id);
        Ok(tables.entities.len() < before)
    }

    async fn list_dioceses(&self) -> Result<Vec<DioceseRow>, DbError> {
        self.enter()?;
        Ok(lock(&self.tables).dioceses.clone())
    }

    async fn get_diocese(&self, id: i64) -> Result<Option<DioceseRow>, DbError> {
        self.enter()?;
        Ok(lock(&self.tables).dioceses.iter().find(|d| d.id == id).cloned())
    }

    async fn create_diocese(&self, input: &DioceseInput) -> Result<DioceseRow, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let mut row = DioceseRow {
            id: next_id(tables.dioceses.iter().map(|d| d.id)),
            nome: String::new(),
            jurisdicao: String::new(),
            id_bispo_titular: None,
            loc_sede: None,
            bispo_titular: None,
            bispos_auxiliares: None,
        };
        apply_diocese(&mut row, input);
        tables.dioceses.push(row.clone());
        Ok(row)
    }

    async fn update_diocese(&self, id: i64, input: &DioceseInput) -> Result<DioceseRow, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let row = tables
            .dioceses
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| missing("diocese", id))?;
        apply_diocese(row, input);
        Ok(row.clone())
    }

    async fn delete_diocese(&self, id: i64) -> Result<bool, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let before = tables.dioceses.len();
        tables.dioceses.retain(|d| d.id != id);
        Ok(tables.dioceses.len() < before)
    }

    async fn list_clergy(&self) -> Result<Vec<ClergyRow>, DbError> {
        self.enter()?;
        Ok(lock(&self.tables).clergy.clone())
    }

    async fn get_clergy(&self, id: i64) -> Result<Option<ClergyRow>, DbError> {
        self.enter()?;
        Ok(lock(&self.tables).clergy.iter().find(|c| c.id == id).cloned())
    }

    async fn create_clergy(&self, input: &ClergyInput) -> Result<ClergyRow, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let mut row = ClergyRow {
            id: next_id(tables.clergy.iter().map(|c| c.id)),
            nome_completo: String::new(),
            titulo: None,
            id_diocese_auxiliar: None,
            email: None,
        };
        apply_clergy(&mut row, input);
        tables.clergy.push(row.clone());
        Ok(row)
    }

    async fn update_clergy(&self, id: i64, input: &ClergyInput) -> Result<ClergyRow, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let row = tables
            .clergy
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| missing("clero", id))?;
        apply_clergy(row, input);
        Ok(row.clone())
    }

    async fn delete_clergy(&self, id: i64) -> Result<bool, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let before = tables.clergy.len();
        tables.clergy.retain(|c| c.id != id);
        Ok(tables.clergy.len() < before)
    }

    async fn list_photos(&self, entity_id: i64) -> Result<Vec<PhotoRow>, DbError> {
        self.enter()?;
        let mut photos: Vec<PhotoRow> = lock(&self.tables)
            .photos
            .iter()
            .filter(|p| p.id_entidade == entity_id)
            .cloned()
            .collect();
        photos.sort_by_key(|p| p.ordem);
        Ok(photos)
    }

    async fn cover_photo(&self, entity_id: i64) -> Result<Option<PhotoRow>, DbError> {
        Ok(self.list_photos(entity_id).await?.into_iter().next())
    }

    async fn create_photo(&self, input: &PhotoInput) -> Result<PhotoRow, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let mut row = PhotoRow {
            id: next_id(tables.photos.iter().map(|p| p.id)),
            id_entidade: 0,
            url_foto: String::new(),
            legenda: None,
            ordem: 0,
        };
        apply_photo(&mut row, input);
        tables.photos.push(row.clone());
        Ok(row)
    }

    async fn update_photo(&self, id: i64, input: &PhotoInput) -> Result<PhotoRow, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let row = tables
            .photos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| missing("fotosentidade", id))?;
        apply_photo(row, input);
        Ok(row.clone())
    }

    async fn delete_photo(&self, id: i64) -> Result<bool, DbError> {
        self.enter()?;
        let mut tables = lock(&self.tables);
        let before = tables.photos.len();
        tables.photos.retain(|p| p.id != id);
        Ok(tables.photos.len() < before)
    }

    async fn list_states(&self) -> Result<Vec<String>, DbError> {
        self.enter()?;
        let tables = lock(&self.tables);
        Ok(Self::distinct(tables.entities.iter().map(|e| e.estado.as_ref())))
    }

    async fn list_cities(&self, state: Option<&str>) -> Result<Vec<String>, DbError> {
        self.enter()?;
        let tables = lock(&self.tables);
        Ok(Self::distinct(
            tables
                .entities
                .iter()
                .filter(|e| state.map_or(true, |s| e.estado.as_deref() == Some(s)))
                .map(|e| e.cidade.as_ref()),
        ))
    }

    async fn counts(&self) -> Result<TableCounts, DbError> {
        self.enter()?;
        let tables = lock(&self.tables);
        Ok(TableCounts {
            entities: tables.entities.len() as u64,
            dioceses: tables.dioceses.len() as u64,
            clergy: tables.clergy.len() as u64,
        })
    }
}

// ============================================================================
// REST API
// ============================================================================

#[derive(Debug, Default)]
struct Resources {
    entities: Vec<ApiEntity>,
    dioceses: Vec<ApiDiocese>,
    clergy: Vec<ApiClergy>,
}

/// In-memory REST backend.
///
/// List filters are recorded but not applied, like a server that ignores
/// unknown parameters. `failing` breaks every call; `failing_lookups` breaks
/// only single-item reads.
#[derive(Debug, Default)]
pub struct MockApi {
    resources: Mutex<Resources>,
    failing: AtomicBool,
    failing_lookups: AtomicBool,
    call_count: AtomicU32,
    last_entity_query: Mutex<Option<EntityQuery>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(self, entities: Vec<ApiEntity>) -> Self {
        lock(&self.resources).entities = entities;
        self
    }

    pub fn with_dioceses(self, dioceses: Vec<ApiDiocese>) -> Self {
        lock(&self.resources).dioceses = dioceses;
        self
    }

    pub fn with_clergy(self, clergy: Vec<ApiClergy>) -> Self {
        lock(&self.resources).clergy = clergy;
        self
    }

    pub fn with_failing(self, failing: bool) -> Self {
        self.failing.store(failing, Ordering::SeqCst);
        self
    }

    pub fn with_failing_lookups(self, failing: bool) -> Self {
        self.failing_lookups.store(failing, Ordering::SeqCst);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Filters passed to the most recent entity listing
    pub fn last_entity_query(&self) -> Option<EntityQuery> {
        lock(&self.last_entity_query).clone()
    }

    fn enter(&self) -> Result<(), ApiError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 503,
                message: "HTTP 503".to_string(),
            });
        }
        Ok(())
    }

    fn enter_lookup(&self) -> Result<(), ApiError> {
        self.enter()?;
        if self.failing_lookups.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "lookup failed".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(path: &str, id: i64) -> ApiError {
    ApiError::NotFound(format!("{}/{}", path, id))
}

fn entity_from_input(id: i64, input: &ApiEntityInput) -> ApiEntity {
    ApiEntity {
        id,
        id_diocese: input.id_diocese,
        nome: input.nome.clone().unwrap_or_default(),
        tipo: input.tipo.clone().unwrap_or_default(),
        endereco: input.endereco.clone(),
        cidade: input.cidade.clone(),
        estado: input.estado.clone(),
        cep: input.cep.clone(),
        telefone: input.telefone.clone(),
        email: input.email.clone(),
        website: input.website.clone(),
        descricao: input.descricao.clone(),
        latitude: input.latitude,
        longitude: input.longitude,
        url_foto: None,
        diocese: None,
        reitor: None,
        fotos: None,
    }
}

#[async_trait]
impl CatalogApi for MockApi {
    async fn health(&self, _ctx: &RequestContext) -> Result<HealthStatus, ApiError> {
        self.enter()?;
        Ok(HealthStatus {
            status: "ok".to_string(),
            message: "mock API".to_string(),
            timestamp: None,
        })
    }

    async fn list_entities(
        &self,
        query: &EntityQuery,
        _ctx: &RequestContext,
    ) -> Result<EntityList, ApiError> {
        self.enter()?;
        *lock(&self.last_entity_query) = Some(query.clone());
        let entidades = lock(&self.resources).entities.clone();
        Ok(EntityList {
            total: entidades.len() as u64,
            entidades,
        })
    }

    async fn get_entity(&self, id: i64, _ctx: &RequestContext) -> Result<ApiEntity, ApiError> {
        self.enter_lookup()?;
        lock(&self.resources)
            .entities
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| not_found("/entidades", id))
    }

    async fn create_entity(
        &self,
        input: &ApiEntityInput,
        _ctx: &RequestContext,
    ) -> Result<ApiEntity, ApiError> {
        self.enter()?;
        let mut resources = lock(&self.resources);
        let entity = entity_from_input(next_id(resources.entities.iter().map(|e| e.id)), input);
        resources.entities.push(entity.clone());
        Ok(entity)
    }

    async fn update_entity(
        &self,
        id: i64,
        input: &ApiEntityInput,
        _ctx: &RequestContext,
    ) -> Result<ApiEntity, ApiError> {
        self.enter()?;
        let mut resources = lock(&self.resources);
        let entity = resources
            .entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("/entidades", id))?;
        if let Some(ref nome) = input.nome {
            entity.nome = nome.clone();
        }
        if let Some(ref tipo) = input.tipo {
            entity.tipo = tipo.clone();
        }
        if input.cidade.is_some() {
            entity.cidade = input.cidade.clone();
        }
        if input.estado.is_some() {
            entity.estado = input.estado.clone();
        }
        Ok(entity.clone())
    }

    async fn delete_entity(&self, id: i64, _ctx: &RequestContext) -> Result<(), ApiError> {
        self.enter()?;
        let mut resources = lock(&self.resources);
        let before = resources.entities.len();
        resources.entities.retain(|e| e.id != id);
        if resources.entities.len() == before {
            return Err(not_found("/entidades", id));
        }
        Ok(())
    }

    async fn list_dioceses(
        &self,
        _query: &DioceseQuery,
        _ctx: &RequestContext,
    ) -> Result<DioceseList, ApiError> {
        self.enter()?;
        let dioceses = lock(&self.resources).dioceses.clone();
        Ok(DioceseList {
            total: dioceses.len() as u64,
            dioceses,
        })
    }

    async fn get_diocese(&self, id: i64, _ctx: &RequestContext) -> Result<ApiDiocese, ApiError> {
        self.enter_lookup()?;
        lock(&self.resources)
            .dioceses
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| not_found("/dioceses", id))
    }

    async fn create_diocese(
        &self,
        input: &ApiDioceseInput,
        _ctx: &RequestContext,
    ) -> Result<ApiDiocese, ApiError> {
        self.enter()?;
        let mut resources = lock(&self.resources);
        let diocese = ApiDiocese {
            id: next_id(resources.dioceses.iter().map(|d| d.id)),
            nome: input.nome.clone().unwrap_or_default(),
            jurisdicao: input.jurisdicao.clone().unwrap_or_default(),
            loc_sede: input.loc_sede.clone(),
            bispo_titular: None,
            bispos_auxiliares: None,
        };
        resources.dioceses.push(diocese.clone());
        Ok(diocese)
    }

    async fn update_diocese(
        &self,
        id: i64,
        input: &ApiDioceseInput,
        _ctx: &RequestContext,
    ) -> Result<ApiDiocese, ApiError> {
        self.enter()?;
        let mut resources = lock(&self.resources);
        let diocese = resources
            .dioceses
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| not_found("/dioceses", id))?;
        if let Some(ref nome) = input.nome {
            diocese.nome = nome.clone();
        }
        if let Some(ref jurisdicao) = input.jurisdicao {
            diocese.jurisdicao = jurisdicao.clone();
        }
        if input.loc_sede.is_some() {
            diocese.loc_sede = input.loc_sede.clone();
        }
        Ok(diocese.clone())
    }

    async fn delete_diocese(&self, id: i64, _ctx: &RequestContext) -> Result<(), ApiError> {
        self.enter()?;
        let mut resources = lock(&self.resources);
        let before = resources.dioceses.len();
        resources.dioceses.retain(|d| d.id != id);
        if resources.dioceses.len() == before {
            return Err(not_found("/dioceses", id));
        }
        Ok(())
    }

    async fn list_clergy(&self, _ctx: &RequestContext) -> Result<ClergyList, ApiError> {
        self.enter()?;
        let clero = lock(&self.resources).clergy.clone();
        Ok(ClergyList {
            total: clero.len() as u64,
            clero,
        })
    }

    async fn get_clergy(&self, id: i64, _ctx: &RequestContext) -> Result<ApiClergy, ApiError> {
        self.enter_lookup()?;
        lock(&self.resources)
            .clergy
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found("/clero", id))
    }

    async fn create_clergy(
        &self,
        input: &ApiClergyInput,
        _ctx: &RequestContext,
    ) -> Result<ApiClergy, ApiError> {
        self.enter()?;
        let mut resources = lock(&self.resources);
        let clergy = ApiClergy {
            id: next_id(resources.clergy.iter().map(|c| c.id)),
            nome_completo: input.nome_completo.clone().unwrap_or_default(),
            titulo: input.titulo.clone(),
            email: input.email.clone(),
            id_diocese_auxiliar: input.id_diocese_auxiliar,
        };
        resources.clergy.push(clergy.clone());
        Ok(clergy)
    }

    async fn update_clergy(
        &self,
        id: i64,
        input: &ApiClergyInput,
        _ctx: &RequestContext,
    ) -> Result<ApiClergy, ApiError> {
        self.enter()?;
        let mut resources = lock(&self.resources);
        let clergy = resources
            .clergy
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("/clero", id))?;
        if let Some(ref nome) = input.nome_completo {
            clergy.nome_completo = nome.clone();
        }
        if input.titulo.is_some() {
            clergy.titulo = input.titulo.clone();
        }
        if input.email.is_some() {
            clergy.email = input.email.clone();
        }
        if input.id_diocese_auxiliar.is_some() {
            clergy.id_diocese_auxiliar = input.id_diocese_auxiliar;
        }
        Ok(clergy.clone())
    }

    async fn delete_clergy(&self, id: i64, _ctx: &RequestContext) -> Result<(), ApiError> {
        self.enter()?;
        let mut resources = lock(&self.resources);
        let before = resources.clergy.len();
        resources.clergy.retain(|c| c.id != id);
        if resources.clergy.len() == before {
            return Err(not_found("/clero", id));
        }
        Ok(())
    }

    async fn list_jurisdictions(&self, _ctx: &RequestContext) -> Result<Vec<String>, ApiError> {
        self.enter()?;
        Ok(vec![
            "Patriarcado Ecumênico".to_string(),
            "Patriarcado de Antioquia".to_string(),
            "Patriarcado de Moscou".to_string(),
            "Patriarcado da Sérvia".to_string(),
            "Igreja Autocéfala da Polônia".to_string(),
        ])
    }

    async fn list_kinds(&self, _ctx: &RequestContext) -> Result<Vec<String>, ApiError> {
        self.enter()?;
        Ok(ecclesia_db_client::schema::KIND_VALUES
            .iter()
            .map(|k| k.to_string())
            .collect())
    }

    async fn list_states(&self, _ctx: &RequestContext) -> Result<Vec<String>, ApiError> {
        self.enter()?;
        let resources = lock(&self.resources);
        Ok(MockStore::distinct(resources.entities.iter().map(|e| e.estado.as_ref())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_crud() {
        let store = MockStore::new();
        let created = store
            .create_clergy(&ClergyInput {
                nome_completo: Some("Pe. Jorge".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        assert!(store.get_clergy(1).await.unwrap().is_some());
        assert!(store.delete_clergy(1).await.unwrap());
        assert!(!store.delete_clergy(1).await.unwrap());
        assert_eq!(store.call_count(), 4);
    }

    #[tokio::test]
    async fn test_mock_store_failing() {
        let store = MockStore::new().with_failing(true);
        assert!(store.ping().await.is_err());
        store.set_failing(false);
        assert!(store.ping().await.is_ok());
        assert_eq!(store.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_api_records_query() {
        let api = MockApi::new();
        let query = EntityQuery {
            estado: Some("SP".into()),
            ..Default::default()
        };
        api.list_entities(&query, &RequestContext::default())
            .await
            .unwrap();
        assert_eq!(api.last_entity_query(), Some(query));

        let err = api
            .get_entity(1, &RequestContext::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
