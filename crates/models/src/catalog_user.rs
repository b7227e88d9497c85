use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

pub const ROLE_USER: &str = "USER";
pub const ROLE_ADMIN: &str = "ADMIN";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_role(role: &str) -> Result<(), errors::ModelError> {
    if role != ROLE_USER && role != ROLE_ADMIN {
        return Err(errors::ModelError::Validation(format!("unknown role: {role}")));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    username: &str,
    password_hash: &str,
    role: &str,
) -> Result<Model, errors::ModelError> {
    if username.trim().is_empty() {
        return Err(errors::ModelError::Validation("username required".into()));
    }
    validate_role(role)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        password_hash: Set(password_hash.to_string()),
        role: Set(role.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
