//! REST client behaviour against a mock HTTP server

use ecclesia_api_client::{
    ApiClient, ApiConfig, ApiDioceseInput, ApiError, CatalogApi, EntityQuery, RequestContext,
};
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig {
        base_url: format!("{}/api", server.uri()),
        ..Default::default()
    })
    .unwrap()
}

fn entity_json(id: i64, estado: &str, tipo: &str) -> serde_json::Value {
    json!({
        "id": id,
        "nome": format!("Entidade {}", id),
        "tipo": tipo,
        "endereco": "Rua A, 1",
        "cidade": "São Paulo",
        "estado": estado,
        "cep": "01000000",
        "telefone": "11999999999",
        "email": "contato@example.org",
        "website": null,
        "diocese": {
            "id": 7,
            "nome": "Diocese de São Paulo",
            "jurisdicao": "Patriarcado de Antioquia",
            "loc_sede": "São Paulo"
        }
    })
}

#[tokio::test]
async fn test_envelope_error_with_http_200_raises_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/entidades/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "error", "message": "X" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_entity(1, &RequestContext::default())
        .await
        .unwrap_err();

    match err {
        ApiError::Envelope(message) => assert_eq!(message, "X"),
        other => panic!("expected envelope error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dioceses/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_diocese(99, &RequestContext::default())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_server_message_is_carried_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clero"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "status": "error", "message": "database offline" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_clergy(&RequestContext::default())
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database offline");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failure_without_body_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/estados"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_states(&RequestContext::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP 502");
}

#[tokio::test]
async fn test_list_entities_sends_only_present_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/entidades"))
        .and(query_param("estado", "SP"))
        .and(query_param("tipo", "Catedral"))
        .and(query_param_is_missing("cidade"))
        .and(query_param_is_missing("diocese_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "ok",
            "data": { "total": 1, "entidades": [entity_json(1, "SP", "Catedral")] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = EntityQuery {
        estado: Some("SP".into()),
        cidade: Some(String::new()),
        tipo: Some("Catedral".into()),
        ..Default::default()
    };
    let page = client_for(&server)
        .list_entities(&query, &RequestContext::default())
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.entidades[0].estado.as_deref(), Some("SP"));
    assert_eq!(
        page.entidades[0].diocese.as_ref().map(|d| d.jurisdicao.as_str()),
        Some("Patriarcado de Antioquia")
    );
}

#[tokio::test]
async fn test_delete_with_204_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/clero/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete_clergy(4, &RequestContext::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_diocese_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/dioceses"))
        .and(body_json(json!({
            "nome": "Diocese do Rio",
            "jurisdicao": "Patriarcado de Moscou"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "success",
            "message": "created",
            "data": {
                "id": 12,
                "nome": "Diocese do Rio",
                "jurisdicao": "Patriarcado de Moscou",
                "loc_sede": null
            }
        })))
        .mount(&server)
        .await;

    let input = ApiDioceseInput {
        nome: Some("Diocese do Rio".into()),
        jurisdicao: Some("Patriarcado de Moscou".into()),
        loc_sede: None,
    };
    let diocese = client_for(&server)
        .create_diocese(&input, &RequestContext::default())
        .await
        .unwrap();

    assert_eq!(diocese.id, 12);
    assert!(diocese.bispo_titular.is_none());
}

#[tokio::test]
async fn test_context_headers_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .and(header("x-forwarded-user", "maria"))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "healthy",
            "data": { "status": "ok", "message": "healthy", "timestamp": "2024-01-01T00:00:00Z" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = RequestContext::new()
        .with_header(
            HeaderName::from_static("x-forwarded-user"),
            HeaderValue::from_static("maria"),
        )
        .with_bearer("session-token")
        .unwrap();

    let health = client_for(&server).health(&ctx).await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_caller_supplied_client_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tipos"))
        .and(header("user-agent", "catalog-ssr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "ok",
            "data": ["Catedral", "Paroquia"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let custom = reqwest::Client::builder()
        .user_agent("catalog-ssr")
        .build()
        .unwrap();
    let ctx = RequestContext::new().with_client(custom);

    let kinds = client_for(&server).list_kinds(&ctx).await.unwrap();
    assert_eq!(kinds, vec!["Catedral".to_string(), "Paroquia".to_string()]);
}

#[tokio::test]
async fn test_success_without_data_is_invalid_for_reads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jurisdicoes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "message": "ok" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_jurisdictions(&RequestContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidResponse(_)));
}
