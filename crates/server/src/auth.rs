use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use base64::Engine;

use crate::errors::ApiError;
use service::entry::service::EntryService;
use service::identity::domain::{Principal, Role};
use service::identity::service::IdentityService;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    pub entries: Arc<EntryService>,
    pub identity: Arc<IdentityService>,
}

/// Decode an HTTP Basic `Authorization` header value into its
/// username/password pair.
fn decode_basic(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Authentication gate for the entry routes. Resolves the caller exactly
/// once per request and stores the resulting principal as a request
/// extension; handlers only ever see the principal, never the credentials.
pub async fn authenticate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(ApiError::unauthorized)?;
    let (username, password) = decode_basic(header_value).ok_or_else(ApiError::unauthorized)?;

    let principal = state.identity.authenticate(&username, &password).await?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Pure capability check at the API boundary; role logic never leaks into
/// the entry service.
pub fn authorize(principal: &Principal, required: Role) -> Result<(), ApiError> {
    if principal.has_role(required) {
        Ok(())
    } else {
        Err(ApiError::forbidden())
    }
}
