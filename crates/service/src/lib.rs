//! Service layer providing business-oriented operations on top of models.
//! - Separates domain rules from data access behind repository traits.
//! - Reuses validation and entity definitions from the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod entry;
pub mod errors;
pub mod identity;
