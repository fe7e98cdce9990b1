//! Data service over real HTTP adapters, with mock servers for both backends

use ecclesia_api_client::ApiConfig;
use ecclesia_db_client::DbConfig;
use ecclesia_sdk::{
    BackendPreference, CatalogConfig, CatalogError, DataService, DioceseFilter, EntityFilter,
    EntityKind, Jurisdiction, NewClergy,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(db: &MockServer, api: &MockServer) -> DataService {
    DataService::from_config(CatalogConfig {
        database: Some(DbConfig {
            url: db.uri(),
            api_key: "publishable".into(),
            ..Default::default()
        }),
        api: Some(ApiConfig {
            base_url: format!("{}/api", api.uri()),
            ..Default::default()
        }),
        preference: BackendPreference::PreferPrimary,
    })
    .unwrap()
}

fn rest_service_for(db: &MockServer, api: &MockServer) -> DataService {
    DataService::from_config(CatalogConfig {
        database: Some(DbConfig {
            url: db.uri(),
            api_key: "publishable".into(),
            ..Default::default()
        }),
        api: Some(ApiConfig {
            base_url: format!("{}/api", api.uri()),
            ..Default::default()
        }),
        preference: BackendPreference::PreferSecondary,
    })
    .unwrap()
}

fn envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "data": data }))
}

fn rest_entity(id: i64, estado: &str, tipo: &str) -> serde_json::Value {
    json!({
        "id": id,
        "nome": format!("Entidade {}", id),
        "tipo": tipo,
        "estado": estado,
        "cidade": "Cidade",
        "diocese": { "id": 1, "nome": "Diocese", "jurisdicao": "Patriarcado Ecumênico" }
    })
}

#[tokio::test]
async fn test_database_outage_falls_back_to_rest_for_reads() {
    let db = MockServer::start().await;
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/entidadeeclesiastica"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&db)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/entidades"))
        .and(query_param("estado", "SP"))
        .and(query_param("tipo", "Catedral"))
        .respond_with(envelope(json!({
            "total": 3,
            "entidades": [
                rest_entity(1, "SP", "Catedral"),
                rest_entity(2, "SP", "Paroquia"),
                rest_entity(3, "RJ", "Catedral")
            ]
        })))
        .mount(&api)
        .await;

    let service = service_for(&db, &api);
    let filter = EntityFilter::default()
        .with_state("SP")
        .with_kind(EntityKind::Cathedral);
    let entities = service.list_entities(&filter).await.unwrap();

    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].id, 1);
    assert_eq!(
        entities[0].jurisdiction(),
        Some(&Jurisdiction::EcumenicalPatriarchate)
    );
    assert_eq!(service.preference(), BackendPreference::PreferPrimary);
}

#[tokio::test]
async fn test_missing_entity_is_none_through_rest() {
    let db = MockServer::start().await;
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/entidadeeclesiastica"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&db)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/entidades/77"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&api)
        .await;

    let service = service_for(&db, &api);
    assert!(service.get_entity(77).await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_clergy_write_switches_to_rest() {
    let db = MockServer::start().await;
    let api = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/clero"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "42501",
            "message": "permission denied for table clero"
        })))
        .expect(1)
        .mount(&db)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/clero"))
        .respond_with(envelope(json!({ "id": 12, "nome_completo": "Pe. Elias" })))
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/clero"))
        .respond_with(envelope(json!({ "total": 1, "clero": [ { "id": 12, "nome_completo": "Pe. Elias" } ] })))
        .mount(&api)
        .await;

    let service = service_for(&db, &api);
    let clergy = service.create_clergy(&NewClergy::new("Pe. Elias")).await.unwrap();
    assert_eq!(clergy.id, 12);
    assert_eq!(service.preference(), BackendPreference::PreferSecondary);

    // Served by the REST API without touching the database again
    let all = service.list_clergy().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_envelope_error_reaches_caller() {
    let db = MockServer::start().await;
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/diocese"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&db)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dioceses/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "error", "message": "Diocese indisponível" })),
        )
        .mount(&api)
        .await;

    let service = service_for(&db, &api);
    let err = service.get_diocese(3).await.unwrap_err();
    assert!(matches!(err, CatalogError::Envelope(ref m) if m == "Diocese indisponível"));
}

#[tokio::test]
async fn test_jurisdiction_filter_sent_as_rest_label() {
    let db = MockServer::start().await;
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&db)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/entidades"))
        .and(query_param("jurisdicao", "Patriarcado de Moscou"))
        .respond_with(envelope(json!({
            "total": 1,
            "entidades": [{
                "id": 8,
                "nome": "Paróquia da Dormição",
                "tipo": "Paroquia",
                "estado": "SP",
                "cidade": "São Paulo",
                "diocese": { "id": 2, "nome": "Diocese", "jurisdicao": "Patriarcado de Moscou" }
            }]
        })))
        .expect(1)
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dioceses"))
        .and(query_param("jurisdicao", "Patriarcado de Moscou"))
        .respond_with(envelope(json!({
            "total": 1,
            "dioceses": [{ "id": 2, "nome": "Diocese", "jurisdicao": "Patriarcado de Moscou" }]
        })))
        .expect(1)
        .mount(&api)
        .await;

    let service = rest_service_for(&db, &api);

    let entities = service
        .list_entities(
            &EntityFilter::default().with_jurisdiction(Jurisdiction::PatriarchateOfMoscow),
        )
        .await
        .unwrap();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].id, 8);

    let dioceses = service
        .list_dioceses(&DioceseFilter {
            jurisdiction: Some(Jurisdiction::PatriarchateOfMoscow),
        })
        .await
        .unwrap();
    assert_eq!(dioceses.len(), 1);
    assert_eq!(dioceses[0].jurisdiction, Jurisdiction::PatriarchateOfMoscow);
}
