use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use base64::Engine;
use serde_json::{json, Value};
use tower::Service;
use tower_http::cors::CorsLayer;

use models::entry;
use server::auth::ServerState;
use server::routes;
use service::entry::{repository::mock::MockEntryRepository, service::EntryService};
use service::identity::{
    domain::Role, repository::mock::MockIdentityProvider, service::IdentityService,
};

const SLIME: &str = "Tensei Shitara Slime Datta Ken";

/// Router over in-memory collaborators: "david" has role USER, "carlos"
/// has role ADMIN.
fn build_app() -> (Router, Arc<MockEntryRepository>) {
    let repo = Arc::new(MockEntryRepository::default());
    let provider = MockIdentityProvider::default()
        .with_user("david", "devdojo", Role::User)
        .with_user("carlos", "devdojo", Role::Admin);
    let state = ServerState {
        entries: Arc::new(EntryService::new(repo.clone())),
        identity: Arc::new(IdentityService::new(Arc::new(provider))),
    };
    (routes::build_router(state, CorsLayer::very_permissive()), repo)
}

fn basic(username: &str, password: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().call(req).await.unwrap()
}

async fn body_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = build_app();
    let resp = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn missing_credentials_are_unauthorized() {
    let (app, _) = build_app();
    let resp = send(&app, request("GET", "/entries/1", None, None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let (app, _) = build_app();
    let auth = basic("david", "senhaInvalida");
    let resp = send(&app, request("GET", "/entries/1", Some(&auth), None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn find_all_is_forbidden_for_role_user() {
    let (app, _) = build_app();
    let auth = basic("david", "devdojo");
    let resp = send(&app, request("GET", "/entries", Some(&auth), None)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 403);
}

#[tokio::test]
async fn find_all_returns_entries_for_admin() {
    let (app, repo) = build_app();
    repo.seed(entry::Model { id: 1, name: SLIME.into() });
    let auth = basic("carlos", "devdojo");
    let resp = send(&app, request("GET", "/entries", Some(&auth), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body, json!([{"id": 1, "name": SLIME}]));
}

#[tokio::test]
async fn find_by_id_returns_entry_for_role_user() {
    let (app, repo) = build_app();
    repo.seed(entry::Model { id: 1, name: SLIME.into() });
    let auth = basic("david", "devdojo");
    let resp = send(&app, request("GET", "/entries/1", Some(&auth), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"id": 1, "name": SLIME}));
}

#[tokio::test]
async fn find_by_id_missing_entry_is_not_found() {
    let (app, _) = build_app();
    let auth = basic("david", "devdojo");
    let resp = send(&app, request("GET", "/entries/1", Some(&auth), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert!(body["developerMessage"].is_string());
}

#[tokio::test]
async fn save_creates_entry() {
    let (app, _) = build_app();
    let auth = basic("david", "devdojo");
    let resp = send(
        &app,
        request("POST", "/entries", Some(&auth), Some(json!({"name": SLIME}))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["name"], SLIME);
    assert!(body["id"].as_i64().unwrap() >= 1);
}

#[tokio::test]
async fn save_ignores_client_supplied_id() {
    let (app, _) = build_app();
    let auth = basic("david", "devdojo");
    let resp = send(
        &app,
        request("POST", "/entries", Some(&auth), Some(json!({"id": 99, "name": SLIME}))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_ne!(body["id"], 99);
}

#[tokio::test]
async fn save_with_empty_name_is_rejected() {
    let (app, _) = build_app();
    let auth = basic("carlos", "devdojo");
    let resp = send(
        &app,
        request("POST", "/entries", Some(&auth), Some(json!({"name": ""}))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn save_batch_creates_all_entries() {
    let (app, _) = build_app();
    let auth = basic("carlos", "devdojo");
    let resp = send(
        &app,
        request(
            "POST",
            "/entries/batch",
            Some(&auth),
            Some(json!([{"name": SLIME}, {"name": SLIME}])),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn save_batch_with_invalid_name_fails_but_keeps_earlier_writes() {
    let (app, _) = build_app();
    let auth = basic("carlos", "devdojo");
    let resp = send(
        &app,
        request(
            "POST",
            "/entries/batch",
            Some(&auth),
            Some(json!([{"name": "A"}, {"name": ""}, {"name": "C"}])),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 400);

    // The batch is not transactional: the record before the invalid one
    // is already durably written, while the one behind it never was.
    let resp = send(&app, request("GET", "/entries", Some(&auth), None)).await;
    let body = body_json(resp).await;
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect();
    assert!(names.contains(&"A".to_string()));
    assert!(!names.contains(&"C".to_string()));
}

#[tokio::test]
async fn update_replaces_record_and_returns_no_content() {
    let (app, repo) = build_app();
    repo.seed(entry::Model { id: 1, name: SLIME.into() });
    let auth = basic("carlos", "devdojo");
    let resp = send(
        &app,
        request(
            "PUT",
            "/entries/1",
            Some(&auth),
            Some(json!({"name": "Tensei Shitara Slime Datta Ken 2"})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());

    let resp = send(&app, request("GET", "/entries/1", Some(&auth), None)).await;
    assert_eq!(
        body_json(resp).await,
        json!({"id": 1, "name": "Tensei Shitara Slime Datta Ken 2"})
    );
}

#[tokio::test]
async fn update_missing_entry_is_not_found() {
    let (app, _) = build_app();
    let auth = basic("carlos", "devdojo");
    let resp = send(
        &app,
        request("PUT", "/entries/9", Some(&auth), Some(json!({"name": "x"}))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["status"], 404);
}

#[tokio::test]
async fn update_with_empty_name_is_rejected() {
    let (app, repo) = build_app();
    repo.seed(entry::Model { id: 1, name: SLIME.into() });
    let auth = basic("carlos", "devdojo");
    let resp = send(
        &app,
        request("PUT", "/entries/1", Some(&auth), Some(json!({"name": ""}))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_then_find_is_not_found() {
    let (app, repo) = build_app();
    repo.seed(entry::Model { id: 1, name: SLIME.into() });
    let auth = basic("carlos", "devdojo");

    let resp = send(&app, request("DELETE", "/entries/1", Some(&auth), None)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, request("GET", "/entries/1", Some(&auth), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert!(body["developerMessage"].is_string());
}

#[tokio::test]
async fn delete_missing_entry_is_not_found() {
    let (app, _) = build_app();
    let auth = basic("carlos", "devdojo");
    let resp = send(&app, request("DELETE", "/entries/9", Some(&auth), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
