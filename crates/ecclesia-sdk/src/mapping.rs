//! Conversions from backend wire shapes to the canonical model
//!
//! Every conversion is total: missing optional text becomes `""`, missing
//! coordinates stay `None`, and unknown vocabulary values pass through as
//! `Unmapped`.

use ecclesia_api_client::{ApiClergy, ApiClergyRef, ApiDiocese, ApiDioceseRef, ApiEntity, ApiPhoto};
use ecclesia_db_client::{ClergyRow, DioceseRow, EntityRow, PhotoRow};

use crate::model::*;

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Stable sort by `order`; returns the cover URL (the first photo's)
fn order_photos(photos: &mut [Photo]) -> Option<String> {
    photos.sort_by_key(|p| p.order);
    photos.first().map(|p| p.url.clone())
}

// ==================== Database rows ====================

impl From<ClergyRow> for Clergy {
    fn from(row: ClergyRow) -> Self {
        Clergy {
            id: row.id,
            full_name: row.nome_completo,
            title: text(row.titulo),
            email: text(row.email),
            auxiliary_diocese_id: row.id_diocese_auxiliar,
        }
    }
}

impl From<DioceseRow> for Diocese {
    fn from(row: DioceseRow) -> Self {
        Diocese {
            id: row.id,
            name: row.nome,
            jurisdiction: Jurisdiction::from_api(&row.jurisdicao),
            bishop: row.bispo_titular.map(|b| b.nome_completo).unwrap_or_default(),
            auxiliary_bishops: row
                .bispos_auxiliares
                .unwrap_or_default()
                .into_iter()
                .map(|b| b.nome_completo)
                .collect(),
            seat: text(row.loc_sede),
        }
    }
}

impl From<PhotoRow> for Photo {
    fn from(row: PhotoRow) -> Self {
        Photo {
            id: row.id,
            entity_id: row.id_entidade,
            url: row.url_foto,
            caption: row.legenda,
            order: row.ordem,
        }
    }
}

impl From<EntityRow> for EcclesiasticalEntity {
    fn from(row: EntityRow) -> Self {
        let id = row.id;
        let mut photos: Vec<Photo> = row
            .fotosentidade
            .unwrap_or_default()
            .into_iter()
            .map(|p| Photo {
                entity_id: id,
                ..Photo::from(p)
            })
            .collect();
        let cover_photo_url = order_photos(&mut photos);

        EcclesiasticalEntity {
            id,
            diocese_id: row.id_diocese,
            name: row.nome,
            kind: EntityKind::parse(&row.tipo),
            rector: row.clero.map(|c| c.nome_completo).unwrap_or_default(),
            postal_code: text(row.cep),
            state: text(row.estado),
            city: text(row.cidade),
            address: text(row.endereco),
            phone: text(row.telefone),
            email: text(row.email),
            website: text(row.website),
            description: text(row.descricao),
            latitude: row.latitude,
            longitude: row.longitude,
            cover_photo_url,
            photos,
            diocese: row.diocese.map(Diocese::from),
        }
    }
}

// ==================== REST payloads ====================

impl From<ApiClergy> for Clergy {
    fn from(api: ApiClergy) -> Self {
        Clergy {
            id: api.id,
            full_name: api.nome_completo,
            title: text(api.titulo),
            email: text(api.email),
            auxiliary_diocese_id: api.id_diocese_auxiliar,
        }
    }
}

impl From<ApiDiocese> for Diocese {
    fn from(api: ApiDiocese) -> Self {
        Diocese {
            id: api.id,
            name: api.nome,
            jurisdiction: Jurisdiction::from_api(&api.jurisdicao),
            bishop: api.bispo_titular.map(|b| b.nome_completo).unwrap_or_default(),
            auxiliary_bishops: api
                .bispos_auxiliares
                .unwrap_or_default()
                .into_iter()
                .map(|b: ApiClergyRef| b.nome_completo)
                .collect(),
            seat: text(api.loc_sede),
        }
    }
}

/// Embedded summaries carry no bishop data
impl From<ApiDioceseRef> for Diocese {
    fn from(api: ApiDioceseRef) -> Self {
        Diocese {
            id: api.id,
            name: api.nome,
            jurisdiction: Jurisdiction::from_api(&api.jurisdicao),
            bishop: String::new(),
            auxiliary_bishops: Vec::new(),
            seat: text(api.loc_sede),
        }
    }
}

fn photo_from_api(api: ApiPhoto, entity_id: i64) -> Photo {
    Photo {
        id: api.id,
        entity_id,
        url: api.url_foto,
        caption: api.legenda,
        order: api.ordem,
    }
}

impl From<ApiEntity> for EcclesiasticalEntity {
    fn from(api: ApiEntity) -> Self {
        let id = api.id;
        let mut photos: Vec<Photo> = api
            .fotos
            .unwrap_or_default()
            .into_iter()
            .map(|p| photo_from_api(p, id))
            .collect();
        let cover_photo_url =
            order_photos(&mut photos).or_else(|| api.url_foto.filter(|u| !u.is_empty()));
        let diocese_id = api
            .id_diocese
            .or_else(|| api.diocese.as_ref().map(|d| d.id))
            .unwrap_or_default();

        EcclesiasticalEntity {
            id,
            diocese_id,
            name: api.nome,
            kind: EntityKind::parse(&api.tipo),
            rector: api.reitor.map(|r| r.nome_completo).unwrap_or_default(),
            postal_code: text(api.cep),
            state: text(api.estado),
            city: text(api.cidade),
            address: text(api.endereco),
            phone: text(api.telefone),
            email: text(api.email),
            website: text(api.website),
            description: text(api.descricao),
            latitude: api.latitude,
            longitude: api.longitude,
            cover_photo_url,
            photos,
            diocese: api.diocese.map(Diocese::from),
        }
    }
}
