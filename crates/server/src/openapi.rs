use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema, Serialize)]
pub struct EntryDoc {
    pub id: i32,
    pub name: String,
}

#[derive(ToSchema, Serialize)]
pub struct EntryInputDoc {
    pub id: Option<i32>,
    pub name: String,
}

#[derive(ToSchema, Serialize)]
pub struct ErrorBodyDoc {
    pub status: u16,
    #[serde(rename = "developerMessage")]
    pub developer_message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::entries::find,
        crate::routes::entries::list,
        crate::routes::entries::save,
        crate::routes::entries::save_batch,
        crate::routes::entries::update,
        crate::routes::entries::remove,
    ),
    components(
        schemas(
            HealthResponse,
            EntryDoc,
            EntryInputDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "entries")
    )
)]
pub struct ApiDoc;
