use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::auth::{self, ServerState};

pub mod entries;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi::ApiDoc::openapi())
}

/// Build the full application router: public routes plus the
/// credential-gated entry routes.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Every /entries route requires an authenticated principal; the
    // ADMIN-only check on find-all happens in its handler.
    let entry_routes = Router::new()
        .route("/entries", get(entries::list).post(entries::save))
        .route("/entries/batch", post(entries::save_batch))
        .route(
            "/entries/:id",
            get(entries::find).put(entries::update).delete(entries::remove),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::authenticate));

    public
        .merge(entry_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
