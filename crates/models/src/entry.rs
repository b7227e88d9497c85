use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

/// A catalog entry. The id is assigned by the store on insert; a value of 0
/// marks a not-yet-persisted record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

/// An entry is valid iff its name is non-empty.
pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}
