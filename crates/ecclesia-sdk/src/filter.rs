//! List filters
//!
//! All present criteria are ANDed. Empty strings count as absent. Filters
//! are applied client-side on every path, and additionally forwarded as
//! query parameters to the REST API.

use ecclesia_api_client::{DioceseQuery, EntityQuery};
use serde::{Deserialize, Serialize};

use crate::model::{Diocese, EcclesiasticalEntity, EntityKind, Jurisdiction};

/// Criteria for listing entities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityFilter {
    pub state: Option<String>,
    pub city: Option<String>,
    pub kind: Option<EntityKind>,
    pub diocese_id: Option<i64>,
    pub jurisdiction: Option<Jurisdiction>,
}

impl EntityFilter {
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_diocese(mut self, diocese_id: i64) -> Self {
        self.diocese_id = Some(diocese_id);
        self
    }

    pub fn with_jurisdiction(mut self, jurisdiction: Jurisdiction) -> Self {
        self.jurisdiction = Some(jurisdiction);
        self
    }

    /// Whether no criterion is set
    pub fn is_empty(&self) -> bool {
        present(&self.state).is_none()
            && present(&self.city).is_none()
            && self.kind.is_none()
            && self.diocese_id.is_none()
            && self.jurisdiction.is_none()
    }

    pub fn matches(&self, entity: &EcclesiasticalEntity) -> bool {
        if let Some(state) = present(&self.state) {
            if entity.state != state {
                return false;
            }
        }
        if let Some(city) = present(&self.city) {
            if entity.city != city {
                return false;
            }
        }
        if let Some(ref kind) = self.kind {
            if &entity.kind != kind {
                return false;
            }
        }
        if let Some(diocese_id) = self.diocese_id {
            if entity.diocese_id != diocese_id {
                return false;
            }
        }
        if let Some(ref jurisdiction) = self.jurisdiction {
            if entity.jurisdiction() != Some(jurisdiction) {
                return false;
            }
        }
        true
    }

    /// Keep the entities matching every criterion, preserving order
    pub fn apply<I>(&self, entities: I) -> Vec<EcclesiasticalEntity>
    where
        I: IntoIterator<Item = EcclesiasticalEntity>,
    {
        entities.into_iter().filter(|e| self.matches(e)).collect()
    }

    /// REST query parameters
    pub fn to_query(&self) -> EntityQuery {
        EntityQuery {
            estado: present(&self.state).map(str::to_string),
            cidade: present(&self.city).map(str::to_string),
            tipo: self.kind.as_ref().map(|k| k.token().to_string()),
            diocese_id: self.diocese_id,
            jurisdicao: self.jurisdiction.as_ref().map(|j| j.label().to_string()),
        }
    }
}

/// Criteria for listing dioceses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DioceseFilter {
    pub jurisdiction: Option<Jurisdiction>,
}

impl DioceseFilter {
    pub fn matches(&self, diocese: &Diocese) -> bool {
        self.jurisdiction
            .as_ref()
            .map_or(true, |j| &diocese.jurisdiction == j)
    }

    pub fn apply<I>(&self, dioceses: I) -> Vec<Diocese>
    where
        I: IntoIterator<Item = Diocese>,
    {
        dioceses.into_iter().filter(|d| self.matches(d)).collect()
    }

    pub fn to_query(&self) -> DioceseQuery {
        DioceseQuery {
            jurisdicao: self.jurisdiction.as_ref().map(|j| j.label().to_string()),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
