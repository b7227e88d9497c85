use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{authorize, ServerState};
use crate::errors::ApiError;
use models::entry;
use service::identity::domain::{Principal, Role};

#[derive(Debug, Deserialize, Serialize)]
pub struct EntryInput {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

impl EntryInput {
    fn into_model(self) -> entry::Model {
        entry::Model { id: self.id, name: self.name }
    }
}

#[utoipa::path(
    get, path = "/entries/{id}", tag = "entries",
    params(("id" = i32, Path, description = "Entry id")),
    responses(
        (status = 200, description = "OK"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn find(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<entry::Model>, ApiError> {
    let found = state.entries.find_by_id(id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    get, path = "/entries", tag = "entries",
    responses(
        (status = 200, description = "OK"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<entry::Model>>, ApiError> {
    authorize(&principal, Role::Admin)?;
    let all = state.entries.find_all().await?;
    info!(count = all.len(), caller = %principal.username, "list entries");
    Ok(Json(all))
}

#[utoipa::path(
    post, path = "/entries", tag = "entries",
    request_body = crate::openapi::EntryInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid Name"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn save(
    State(state): State<ServerState>,
    Json(input): Json<EntryInput>,
) -> Result<(StatusCode, Json<entry::Model>), ApiError> {
    entry::validate_name(&input.name).map_err(|_| ApiError::invalid_name())?;
    let saved = state.entries.save(input.into_model()).await?;
    info!(id = saved.id, name = %saved.name, "created entry");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[utoipa::path(
    post, path = "/entries/batch", tag = "entries",
    request_body = Vec<crate::openapi::EntryInputDoc>,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid Name"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn save_batch(
    State(state): State<ServerState>,
    Json(inputs): Json<Vec<EntryInput>>,
) -> Result<(StatusCode, Json<Vec<entry::Model>>), ApiError> {
    let entries = inputs.into_iter().map(EntryInput::into_model).collect();
    let saved = state.entries.save_batch(entries).await?;
    info!(count = saved.len(), "created entry batch");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[utoipa::path(
    put, path = "/entries/{id}", tag = "entries",
    params(("id" = i32, Path, description = "Entry id")),
    request_body = crate::openapi::EntryInputDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid Name"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<EntryInput>,
) -> Result<StatusCode, ApiError> {
    entry::validate_name(&input.name).map_err(|_| ApiError::invalid_name())?;
    // The path id wins over whatever id the body carried.
    let mut model = input.into_model();
    model.id = id;
    state.entries.update(model).await?;
    info!(id, "updated entry");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/entries/{id}", tag = "entries",
    params(("id" = i32, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.entries.delete(id).await?;
    info!(id, "deleted entry");
    Ok(StatusCode::NO_CONTENT)
}
