use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use service::errors::ServiceError;
use service::identity::errors::AuthError;

/// Protocol-level failure. Every error leaving the API carries the same
/// body shape: `{"status": <code>, "developerMessage": <fixed message>}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    developer_message: &'static str,
    detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    status: u16,
    #[serde(rename = "developerMessage")]
    developer_message: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, developer_message: &'static str, detail: Option<String>) -> Self {
        Self { status, developer_message, detail }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", None)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden", None)
    }

    pub fn invalid_name() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid Name", None)
    }

    pub fn status(&self) -> StatusCode { self.status }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                status = self.status.as_u16(),
                detail = self.detail.as_deref().unwrap_or_default(),
                "request failed"
            );
        }
        let body = ErrorBody {
            status: self.status.as_u16(),
            developer_message: self.developer_message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// The only place domain failures get translated to protocol codes.
impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let detail = Some(e.to_string());
        match e {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Entry not found", detail),
            ServiceError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, "Invalid Name", detail),
            ServiceError::Db(_) | ServiceError::Model(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "A storage error happened", detail)
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized => Self::unauthorized(),
            AuthError::Hash(_) | AuthError::UnknownRole(_) | AuthError::Db(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "A storage error happened",
                Some(e.to_string()),
            ),
        }
    }
}
