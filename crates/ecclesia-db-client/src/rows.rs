//! Row shapes for the catalog tables

use serde::{Deserialize, Serialize};

/// Client configuration
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Project URL; the HTTP interface lives under `{url}/rest/v1`
    pub url: String,
    /// Publishable API key, sent as `apikey` and bearer token
    pub api_key: String,
    /// Optional non-default schema
    pub schema: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Maximum rows returned by list queries (default: 1000)
    pub row_limit: usize,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            schema: None,
            timeout_secs: 30,
            row_limit: 1000,
        }
    }
}

/// Row of `clero`, also used for embedded rector and bishop relations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClergyRow {
    pub id: i64,
    pub nome_completo: String,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub id_diocese_auxiliar: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Row of `diocese`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DioceseRow {
    pub id: i64,
    pub nome: String,
    pub jurisdicao: String,
    #[serde(default)]
    pub id_bispo_titular: Option<i64>,
    #[serde(default)]
    pub loc_sede: Option<String>,
    /// Embedded through `id_bispo_titular`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bispo_titular: Option<ClergyRow>,
    /// Embedded through `clero.id_diocese_auxiliar`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bispos_auxiliares: Option<Vec<ClergyRow>>,
}

/// Row of `fotosentidade`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRow {
    pub id: i64,
    #[serde(default)]
    pub id_entidade: i64,
    pub url_foto: String,
    #[serde(default)]
    pub legenda: Option<String>,
    #[serde(default)]
    pub ordem: i32,
}

/// Row of `entidadeeclesiastica`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRow {
    pub id: i64,
    pub id_diocese: i64,
    #[serde(default)]
    pub id_reitor: Option<i64>,
    pub nome: String,
    pub tipo: String,
    #[serde(default)]
    pub endereco: Option<String>,
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diocese: Option<DioceseRow>,
    /// Rector, embedded through `id_reitor`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clero: Option<ClergyRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fotosentidade: Option<Vec<PhotoRow>>,
}

/// Insert/update body for `entidadeeclesiastica`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_diocese: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_reitor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
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

/// Insert/update body for `diocese`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DioceseInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdicao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_bispo_titular: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc_sede: Option<String>,
}

/// Insert/update body for `clero`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClergyInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_completo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_diocese_auxiliar: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Insert/update body for `fotosentidade`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_entidade: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_foto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legenda: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordem: Option<i32>,
}

/// Row totals per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub entities: u64,
    pub dioceses: u64,
    pub clergy: u64,
}
