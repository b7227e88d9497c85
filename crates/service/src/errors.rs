use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Domain failures are caller-recoverable; everything else is a storage
    /// failure and must not be masked as one.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}
