use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("password hash error: {0}")]
    Hash(String),
    #[error("unknown role in credential store: {0}")]
    UnknownRole(String),
    #[error("database error: {0}")]
    Db(String),
}
