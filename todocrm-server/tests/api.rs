//! Router tests against the in-memory store

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use todocrm_core::store::MemoryStore;
use todocrm_core::{Connector, Database, EntityKind, ExecutionContext, Store, StoreConfig, StoreError};
use todocrm_server::{build_router, AppState, Revalidator, ServerConfig};
use tower::ServiceExt;

fn app() -> (Router, Revalidator) {
    let db = Database::from_store(MemoryStore::new().into_store());
    let revalidator = Revalidator::new();
    let state = AppState::with_revalidator(db, revalidator.clone());
    (build_router(state, &ServerConfig::default()), revalidator)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_ok() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn todo_lifecycle() {
    let (app, _) = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "title": "Buy milk" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["completed"], false);
    assert_eq!(created["data"]["showOnFront"], true);
    let id = created["data"]["id"].as_str().unwrap().to_owned();

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/todos",
        Some(json!({ "id": id, "updates": { "completed": true } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["completed"], true);
    assert_eq!(updated["data"]["title"], "Buy milk");

    let (status, deleted) = send(&app, Method::DELETE, "/api/todos", Some(json!({ "id": id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"]["id"], id.as_str());

    let (status, listed) = send(&app, Method::GET, "/api/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!({ "success": true, "data": [] }));
}

#[tokio::test]
async fn contact_validation_is_400() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(json!({ "name": "Jo", "email": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Contact email is required" })
    );
}

#[tokio::test]
async fn null_title_is_validation_failure() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::POST, "/api/todos", Some(json!({ "title": null }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Todo title cannot be empty" })
    );
}

#[tokio::test]
async fn contact_email_normalized() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(json!({ "name": "Jo", "email": "  JO@Example.COM " })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "jo@example.com");
    assert!(body["data"].get("phone").is_none());
}

#[tokio::test]
async fn missing_id_is_404() {
    let (app, _) = app();
    let id = uuid::Uuid::new_v4().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/contacts",
        Some(json!({ "id": id, "updates": { "company": "Acme" } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Contact not found");

    let (status, _) = send(&app, Method::DELETE, "/api/todos", Some(json!({ "id": "nope" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_is_400_envelope() {
    let (app, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/todos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request: "));
}

#[tokio::test]
async fn delete_without_id_is_400() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::DELETE, "/api/contacts", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn mutations_publish_revalidation() {
    let (app, revalidator) = app();
    let mut rx = revalidator.subscribe();

    send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(json!({ "name": "Jo", "email": "jo@example.com" })),
    )
    .await;
    let event = rx.try_recv().unwrap();
    assert_eq!(event.entity, EntityKind::Contact);
    assert_eq!(event.paths, ["/admin", "/crm"]);

    // Failures publish nothing
    send(&app, Method::POST, "/api/todos", Some(json!({ "title": " " }))).await;
    assert!(rx.try_recv().is_err());

    // Reads publish nothing
    send(&app, Method::GET, "/api/todos", None).await;
    assert!(rx.try_recv().is_err());
}

#[derive(Debug)]
struct Down;

impl std::fmt::Display for Down {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("connection refused")
    }
}

impl std::error::Error for Down {}

struct DownConnector;

#[async_trait]
impl Connector for DownConnector {
    async fn connect(&self, _uri: &str) -> Result<Store, StoreError> {
        Err(StoreError::connect(Down))
    }
}

#[tokio::test]
async fn unreachable_store_is_500() {
    let config = StoreConfig::new(
        Some("postgres://db.internal/app".into()),
        ExecutionContext::Production,
    )
    .unwrap();
    let db = Database::new(&config, Arc::new(DownConnector));
    let app = build_router(AppState::new(db), &ServerConfig::default());

    let (status, body) = send(&app, Method::GET, "/api/contacts", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Failed to fetch contacts" })
    );
}
