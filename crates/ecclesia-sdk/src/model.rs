//! Canonical catalog model
//!
//! Both backends are mapped into these types. Field names are English; the
//! JSON form keeps the catalog's Portuguese wire keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::backend::BackendPreference;

// ============================================================================
// Vocabularies
// ============================================================================

/// Kind of ecclesiastical entity
///
/// Values outside the closed set are kept as [`EntityKind::Unmapped`] so that
/// reads never fail on unexpected data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityKind {
    Cathedral,
    Parish,
    Monastery,
    Mission,
    Chapel,
    Unmapped(String),
}

impl EntityKind {
    /// Known kinds, in display order
    pub fn known() -> [EntityKind; 5] {
        [
            EntityKind::Cathedral,
            EntityKind::Parish,
            EntityKind::Monastery,
            EntityKind::Mission,
            EntityKind::Chapel,
        ]
    }

    /// Value stored in the `tipo` column
    pub fn token(&self) -> &str {
        match self {
            EntityKind::Cathedral => "Catedral",
            EntityKind::Parish => "Paroquia",
            EntityKind::Monastery => "Mosteiro",
            EntityKind::Mission => "Missao",
            EntityKind::Chapel => "Capela",
            EntityKind::Unmapped(raw) => raw,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        match self {
            EntityKind::Cathedral => "Catedral",
            EntityKind::Parish => "Paróquia",
            EntityKind::Monastery => "Mosteiro",
            EntityKind::Mission => "Missão",
            EntityKind::Chapel => "Capela",
            EntityKind::Unmapped(raw) => raw,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::known().into_iter().find(|k| k.token() == token)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::known().into_iter().find(|k| k.label() == label)
    }

    /// Token, then label, else [`EntityKind::Unmapped`]
    pub fn parse(value: &str) -> Self {
        Self::from_token(value)
            .or_else(|| Self::from_label(value))
            .unwrap_or_else(|| EntityKind::Unmapped(value.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, EntityKind::Unmapped(_))
    }
}

impl From<String> for EntityKind {
    fn from(value: String) -> Self {
        EntityKind::parse(&value)
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.token().to_string()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Church a diocese belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Jurisdiction {
    EcumenicalPatriarchate,
    PatriarchateOfAntioch,
    PatriarchateOfMoscow,
    PatriarchateOfSerbia,
    PolishAutocephalousChurch,
    Unmapped(String),
}

impl Jurisdiction {
    /// Known jurisdictions, in display order
    pub fn known() -> [Jurisdiction; 5] {
        [
            Jurisdiction::EcumenicalPatriarchate,
            Jurisdiction::PatriarchateOfAntioch,
            Jurisdiction::PatriarchateOfMoscow,
            Jurisdiction::PatriarchateOfSerbia,
            Jurisdiction::PolishAutocephalousChurch,
        ]
    }

    /// Value stored in the `jurisdicao` column
    pub fn token(&self) -> &str {
        match self {
            Jurisdiction::EcumenicalPatriarchate => "PatriarcadoEcumenico",
            Jurisdiction::PatriarchateOfAntioch => "PatriarcadoDeAntioquia",
            Jurisdiction::PatriarchateOfMoscow => "PatriarcadoDeMoscou",
            Jurisdiction::PatriarchateOfSerbia => "PatriarcadoDaServia",
            Jurisdiction::PolishAutocephalousChurch => "IgrejaAutocefalaDaPolonia",
            Jurisdiction::Unmapped(raw) => raw,
        }
    }

    /// Long-form label, as served by the REST API
    pub fn label(&self) -> &str {
        match self {
            Jurisdiction::EcumenicalPatriarchate => "Patriarcado Ecumênico",
            Jurisdiction::PatriarchateOfAntioch => "Patriarcado de Antioquia",
            Jurisdiction::PatriarchateOfMoscow => "Patriarcado de Moscou",
            Jurisdiction::PatriarchateOfSerbia => "Patriarcado da Sérvia",
            Jurisdiction::PolishAutocephalousChurch => "Igreja Autocéfala da Polônia",
            Jurisdiction::Unmapped(raw) => raw,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        // Older rows use the misspelled token.
        if token == "IgrejaAutocefalaDoPolonia" {
            return Some(Jurisdiction::PolishAutocephalousChurch);
        }
        Self::known().into_iter().find(|j| j.token() == token)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::known().into_iter().find(|j| j.label() == label)
    }

    /// Label, then token, else [`Jurisdiction::Unmapped`]
    pub fn from_api(value: &str) -> Self {
        Self::from_label(value)
            .or_else(|| Self::from_token(value))
            .unwrap_or_else(|| Jurisdiction::Unmapped(value.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Jurisdiction::Unmapped(_))
    }
}

impl From<String> for Jurisdiction {
    fn from(value: String) -> Self {
        Jurisdiction::from_api(&value)
    }
}

impl From<Jurisdiction> for String {
    fn from(jurisdiction: Jurisdiction) -> Self {
        jurisdiction.token().to_string()
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Records
// ============================================================================

/// A clergy member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clergy {
    pub id: i64,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    #[serde(rename = "titulo")]
    pub title: String,
    pub email: String,
    /// Diocese this cleric serves as auxiliary bishop
    #[serde(rename = "id_diocese_auxiliar", default)]
    pub auxiliary_diocese_id: Option<i64>,
}

/// A diocese
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diocese {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "jurisdicao")]
    pub jurisdiction: Jurisdiction,
    /// Titular bishop's name; empty when unknown
    #[serde(rename = "bispo")]
    pub bishop: String,
    #[serde(rename = "bispos_auxiliares", default)]
    pub auxiliary_bishops: Vec<String>,
    /// Seat location
    #[serde(rename = "loc_sede")]
    pub seat: String,
}

/// A photo of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    #[serde(rename = "id_entidade")]
    pub entity_id: i64,
    #[serde(rename = "url_foto")]
    pub url: String,
    #[serde(rename = "legenda", default)]
    pub caption: Option<String>,
    /// Display position; the lowest value is the cover
    #[serde(rename = "ordem")]
    pub order: i32,
}

/// A cathedral, parish, monastery, mission or chapel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcclesiasticalEntity {
    pub id: i64,
    #[serde(rename = "id_diocese")]
    pub diocese_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: EntityKind,
    /// Rector's name; empty when none is assigned
    #[serde(rename = "reitor")]
    pub rector: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub email: String,
    pub website: String,
    #[serde(rename = "descricao")]
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "url_foto")]
    pub cover_photo_url: Option<String>,
    /// Sorted ascending by `order`
    #[serde(rename = "fotos", default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub diocese: Option<Diocese>,
}

impl EcclesiasticalEntity {
    /// Jurisdiction of the embedded diocese, if any
    pub fn jurisdiction(&self) -> Option<&Jurisdiction> {
        self.diocese.as_ref().map(|d| &d.jurisdiction)
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

// ============================================================================
// Aggregates
// ============================================================================

/// Catalog totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub entities: u64,
    pub dioceses: u64,
    pub clergy: u64,
}

/// Reachability of one backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BackendStatus {
    Available,
    Unavailable { reason: String },
    NotConfigured,
}

impl BackendStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, BackendStatus::Available)
    }
}

/// Result of a health check across both backends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub preference: BackendPreference,
    pub database: BackendStatus,
    pub api: BackendStatus,
}

impl HealthReport {
    /// Whether at least one backend answered
    pub fn is_healthy(&self) -> bool {
        self.database.is_available() || self.api.is_available()
    }
}
