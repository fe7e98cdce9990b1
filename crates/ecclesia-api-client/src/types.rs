//! Wire types for the catalog REST API

use serde::{Deserialize, Serialize};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL including the API prefix (e.g. "https://catalog.example.org/api")
    pub base_url: String,
    /// Optional bearer token sent with every request
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Envelope wrapping every API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// "success" or "error"
    pub status: String,
    /// Payload, absent on errors and some writes
    #[serde(default)]
    pub data: Option<T>,
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Server timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Whether the envelope reports a logical error
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// Body of a failed (non-2xx) response
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Diocese summary embedded in an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDioceseRef {
    pub id: i64,
    pub nome: String,
    /// Long-form jurisdiction label (e.g. "Patriarcado de Antioquia")
    pub jurisdicao: String,
    #[serde(default)]
    pub loc_sede: Option<String>,
}

/// Clergy summary embedded in entities and dioceses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiClergyRef {
    pub id: i64,
    pub nome_completo: String,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Photo attached to an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPhoto {
    pub id: i64,
    pub url_foto: String,
    #[serde(default)]
    pub legenda: Option<String>,
    #[serde(default)]
    pub ordem: i32,
}

/// Ecclesiastical entity as served by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEntity {
    pub id: i64,
    #[serde(default)]
    pub id_diocese: Option<i64>,
    pub nome: String,
    pub tipo: String,
    #[serde(default)]
    pub endereco: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub url_foto: Option<String>,
    #[serde(default)]
    pub diocese: Option<ApiDioceseRef>,
    #[serde(default)]
    pub reitor: Option<ApiClergyRef>,
    #[serde(default)]
    pub fotos: Option<Vec<ApiPhoto>>,
}

/// Diocese as served by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDiocese {
    pub id: i64,
    pub nome: String,
    pub jurisdicao: String,
    #[serde(default)]
    pub loc_sede: Option<String>,
    #[serde(default)]
    pub bispo_titular: Option<ApiClergyRef>,
    #[serde(default)]
    pub bispos_auxiliares: Option<Vec<ApiClergyRef>>,
}

/// Clergy member as served by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiClergy {
    pub id: i64,
    pub nome_completo: String,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub id_diocese_auxiliar: Option<i64>,
}

/// Response from `GET /entidades`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityList {
    pub total: u64,
    pub entidades: Vec<ApiEntity>,
}

/// Response from `GET /dioceses`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DioceseList {
    pub total: u64,
    pub dioceses: Vec<ApiDiocese>,
}

/// Response from `GET /clero`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClergyList {
    pub total: u64,
    pub clero: Vec<ApiClergy>,
}

/// Server-side filters for `GET /entidades`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityQuery {
    pub estado: Option<String>,
    pub cidade: Option<String>,
    pub tipo: Option<String>,
    pub diocese_id: Option<i64>,
    pub jurisdicao: Option<String>,
}

impl EntityQuery {
    /// Query parameters, omitting absent and empty values
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_param(&mut params, "estado", self.estado.as_deref());
        push_param(&mut params, "cidade", self.cidade.as_deref());
        push_param(&mut params, "tipo", self.tipo.as_deref());
        if let Some(id) = self.diocese_id {
            params.push(("diocese_id", id.to_string()));
        }
        push_param(&mut params, "jurisdicao", self.jurisdicao.as_deref());
        params
    }
}

/// Server-side filters for `GET /dioceses`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DioceseQuery {
    pub jurisdicao: Option<String>,
}

impl DioceseQuery {
    /// Query parameters, omitting absent and empty values
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_param(&mut params, "jurisdicao", self.jurisdicao.as_deref());
        params
    }
}

fn push_param(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

/// Body for creating or updating an entity
///
/// Absent fields are omitted, so the same shape serves both `POST` and the
/// partial `PUT`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEntityInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_diocese: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Body for creating or updating a diocese
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDioceseInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    /// Long-form jurisdiction label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdicao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc_sede: Option<String>,
}

/// Body for creating or updating a clergy member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiClergyInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_completo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_diocese_auxiliar: Option<i64>,
}
