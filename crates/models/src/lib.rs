//! SeaORM entities for the entry catalog plus connection helpers.
//! Validation helpers live next to the entities they guard.

pub mod catalog_user;
pub mod db;
pub mod entry;
pub mod errors;
