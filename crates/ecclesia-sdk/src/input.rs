//! Typed write inputs
//!
//! `New*` types carry the required fields of a create; `*Patch` types carry
//! only the fields being changed. Both are validated before any backend is
//! called and converted into the wire shape of whichever backend serves the
//! write.

use ecclesia_api_client::{ApiClergyInput, ApiDioceseInput, ApiEntityInput};
use ecclesia_db_client::{ClergyInput, DioceseInput, EntityInput, PhotoInput};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::model::{EntityKind, Jurisdiction};

// ============================================================================
// Entities
// ============================================================================

/// Fields for creating an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntity {
    pub diocese_id: i64,
    pub name: String,
    pub kind: EntityKind,
    #[serde(default)]
    pub rector_id: Option<i64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl NewEntity {
    pub fn new(diocese_id: i64, name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            diocese_id,
            name: name.into(),
            kind,
            rector_id: None,
            address: None,
            postal_code: None,
            city: None,
            state: None,
            phone: None,
            email: None,
            website: None,
            description: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_id("diocese_id", self.diocese_id)?;
        require_text("name", &self.name)?;
        require_known_kind(&self.kind)?;
        check_email(self.email.as_deref())?;
        check_coordinates(self.latitude, self.longitude)
    }

    pub fn to_row_input(&self) -> EntityInput {
        EntityInput {
            id_diocese: Some(self.diocese_id),
            id_reitor: self.rector_id,
            nome: Some(self.name.trim().to_string()),
            tipo: Some(self.kind.token().to_string()),
            endereco: self.address.clone(),
            cep: self.postal_code.clone(),
            cidade: self.city.clone(),
            estado: self.state.clone(),
            telefone: self.phone.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
            descricao: self.description.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn to_api_input(&self) -> ApiEntityInput {
        ApiEntityInput {
            id_diocese: Some(self.diocese_id),
            nome: Some(self.name.trim().to_string()),
            tipo: Some(self.kind.token().to_string()),
            endereco: self.address.clone(),
            cidade: self.city.clone(),
            estado: self.state.clone(),
            cep: self.postal_code.clone(),
            telefone: self.phone.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
            descricao: self.description.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Fields to change on an entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityPatch {
    pub diocese_id: Option<i64>,
    pub name: Option<String>,
    pub kind: Option<EntityKind>,
    pub rector_id: Option<i64>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl EntityPatch {
    pub fn validate(&self) -> Result<()> {
        if self == &Self::default() {
            return Err(CatalogError::Validation("entity patch changes nothing".into()));
        }
        if let Some(id) = self.diocese_id {
            require_id("diocese_id", id)?;
        }
        if let Some(ref name) = self.name {
            require_text("name", name)?;
        }
        if let Some(ref kind) = self.kind {
            require_known_kind(kind)?;
        }
        check_email(self.email.as_deref())?;
        check_coordinates(self.latitude, self.longitude)
    }

    pub fn to_row_input(&self) -> EntityInput {
        EntityInput {
            id_diocese: self.diocese_id,
            id_reitor: self.rector_id,
            nome: self.name.as_ref().map(|n| n.trim().to_string()),
            tipo: self.kind.as_ref().map(|k| k.token().to_string()),
            endereco: self.address.clone(),
            cep: self.postal_code.clone(),
            cidade: self.city.clone(),
            estado: self.state.clone(),
            telefone: self.phone.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
            descricao: self.description.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn to_api_input(&self) -> ApiEntityInput {
        ApiEntityInput {
            id_diocese: self.diocese_id,
            nome: self.name.as_ref().map(|n| n.trim().to_string()),
            tipo: self.kind.as_ref().map(|k| k.token().to_string()),
            endereco: self.address.clone(),
            cidade: self.city.clone(),
            estado: self.state.clone(),
            cep: self.postal_code.clone(),
            telefone: self.phone.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
            descricao: self.description.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

// ============================================================================
// Dioceses
// ============================================================================

/// Fields for creating a diocese
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDiocese {
    pub name: String,
    pub jurisdiction: Jurisdiction,
    #[serde(default)]
    pub bishop_id: Option<i64>,
    #[serde(default)]
    pub seat: Option<String>,
}

impl NewDiocese {
    pub fn new(name: impl Into<String>, jurisdiction: Jurisdiction) -> Self {
        Self {
            name: name.into(),
            jurisdiction,
            bishop_id: None,
            seat: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_known_jurisdiction(&self.jurisdiction)?;
        if let Some(id) = self.bishop_id {
            require_id("bishop_id", id)?;
        }
        Ok(())
    }

    pub fn to_row_input(&self) -> DioceseInput {
        DioceseInput {
            nome: Some(self.name.trim().to_string()),
            jurisdicao: Some(self.jurisdiction.token().to_string()),
            id_bispo_titular: self.bishop_id,
            loc_sede: self.seat.clone(),
        }
    }

    /// REST shape; the API takes the long-form jurisdiction label
    pub fn to_api_input(&self) -> ApiDioceseInput {
        ApiDioceseInput {
            nome: Some(self.name.trim().to_string()),
            jurisdicao: Some(self.jurisdiction.label().to_string()),
            loc_sede: self.seat.clone(),
        }
    }
}

/// Fields to change on a diocese
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiocesePatch {
    pub name: Option<String>,
    pub jurisdiction: Option<Jurisdiction>,
    pub bishop_id: Option<i64>,
    pub seat: Option<String>,
}

impl DiocesePatch {
    pub fn validate(&self) -> Result<()> {
        if self == &Self::default() {
            return Err(CatalogError::Validation("diocese patch changes nothing".into()));
        }
        if let Some(ref name) = self.name {
            require_text("name", name)?;
        }
        if let Some(ref jurisdiction) = self.jurisdiction {
            require_known_jurisdiction(jurisdiction)?;
        }
        if let Some(id) = self.bishop_id {
            require_id("bishop_id", id)?;
        }
        Ok(())
    }

    pub fn to_row_input(&self) -> DioceseInput {
        DioceseInput {
            nome: self.name.as_ref().map(|n| n.trim().to_string()),
            jurisdicao: self.jurisdiction.as_ref().map(|j| j.token().to_string()),
            id_bispo_titular: self.bishop_id,
            loc_sede: self.seat.clone(),
        }
    }

    pub fn to_api_input(&self) -> ApiDioceseInput {
        ApiDioceseInput {
            nome: self.name.as_ref().map(|n| n.trim().to_string()),
            jurisdicao: self.jurisdiction.as_ref().map(|j| j.label().to_string()),
            loc_sede: self.seat.clone(),
        }
    }
}

// ============================================================================
// Clergy
// ============================================================================

/// Fields for creating a clergy member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClergy {
    pub full_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub auxiliary_diocese_id: Option<i64>,
}

impl NewClergy {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            title: None,
            email: None,
            auxiliary_diocese_id: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("full_name", &self.full_name)?;
        check_email(self.email.as_deref())?;
        if let Some(id) = self.auxiliary_diocese_id {
            require_id("auxiliary_diocese_id", id)?;
        }
        Ok(())
    }

    pub fn to_row_input(&self) -> ClergyInput {
        ClergyInput {
            nome_completo: Some(self.full_name.trim().to_string()),
            titulo: self.title.clone(),
            id_diocese_auxiliar: self.auxiliary_diocese_id,
            email: self.email.clone(),
        }
    }

    pub fn to_api_input(&self) -> ApiClergyInput {
        ApiClergyInput {
            nome_completo: Some(self.full_name.trim().to_string()),
            titulo: self.title.clone(),
            email: self.email.clone(),
            id_diocese_auxiliar: self.auxiliary_diocese_id,
        }
    }
}

/// Fields to change on a clergy member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClergyPatch {
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub auxiliary_diocese_id: Option<i64>,
}

impl ClergyPatch {
    pub fn validate(&self) -> Result<()> {
        if self == &Self::default() {
            return Err(CatalogError::Validation("clergy patch changes nothing".into()));
        }
        if let Some(ref name) = self.full_name {
            require_text("full_name", name)?;
        }
        check_email(self.email.as_deref())?;
        if let Some(id) = self.auxiliary_diocese_id {
            require_id("auxiliary_diocese_id", id)?;
        }
        Ok(())
    }

    pub fn to_row_input(&self) -> ClergyInput {
        ClergyInput {
            nome_completo: self.full_name.as_ref().map(|n| n.trim().to_string()),
            titulo: self.title.clone(),
            id_diocese_auxiliar: self.auxiliary_diocese_id,
            email: self.email.clone(),
        }
    }

    pub fn to_api_input(&self) -> ApiClergyInput {
        ApiClergyInput {
            nome_completo: self.full_name.as_ref().map(|n| n.trim().to_string()),
            titulo: self.title.clone(),
            email: self.email.clone(),
            id_diocese_auxiliar: self.auxiliary_diocese_id,
        }
    }
}

// ============================================================================
// Photos
// ============================================================================

/// Fields for attaching a photo to an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPhoto {
    pub entity_id: i64,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl NewPhoto {
    pub fn validate(&self) -> Result<()> {
        require_id("entity_id", self.entity_id)?;
        require_text("url", &self.url)
    }

    pub fn to_row_input(&self) -> PhotoInput {
        PhotoInput {
            id_entidade: Some(self.entity_id),
            url_foto: Some(self.url.trim().to_string()),
            legenda: self.caption.clone(),
            ordem: Some(self.order),
        }
    }
}

/// Fields to change on a photo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoPatch {
    pub url: Option<String>,
    pub caption: Option<String>,
    pub order: Option<i32>,
}

impl PhotoPatch {
    pub fn validate(&self) -> Result<()> {
        if self == &Self::default() {
            return Err(CatalogError::Validation("photo patch changes nothing".into()));
        }
        if let Some(ref url) = self.url {
            require_text("url", url)?;
        }
        Ok(())
    }

    pub fn to_row_input(&self) -> PhotoInput {
        PhotoInput {
            id_entidade: None,
            url_foto: self.url.as_ref().map(|u| u.trim().to_string()),
            legenda: self.caption.clone(),
            ordem: self.order,
        }
    }
}

// ============================================================================
// Checks
// ============================================================================

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn require_id(field: &str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(CatalogError::Validation(format!("{} must be positive, got {}", field, id)));
    }
    Ok(())
}

fn require_known_kind(kind: &EntityKind) -> Result<()> {
    if !kind.is_known() {
        return Err(CatalogError::Validation(format!("unknown entity kind: {}", kind.token())));
    }
    Ok(())
}

fn require_known_jurisdiction(jurisdiction: &Jurisdiction) -> Result<()> {
    if !jurisdiction.is_known() {
        return Err(CatalogError::Validation(format!(
            "unknown jurisdiction: {}",
            jurisdiction.token()
        )));
    }
    Ok(())
}

fn check_email(email: Option<&str>) -> Result<()> {
    match email.map(str::trim) {
        Some(email) if !email.is_empty() && !email.contains('@') => Err(CatalogError::Validation(
            format!("invalid email address: {}", email),
        )),
        _ => Ok(()),
    }
}

fn check_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<()> {
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CatalogError::Validation(format!("latitude out of range: {}", lat)));
        }
    }
    if let Some(lng) = longitude {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CatalogError::Validation(format!("longitude out of range: {}", lng)));
        }
    }
    Ok(())
}
