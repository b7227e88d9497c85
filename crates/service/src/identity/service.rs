use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;
use tracing::{debug, instrument};

use super::domain::{Principal, Role};
use super::errors::AuthError;
use super::repository::IdentityProvider;

/// Hash a plaintext password into a PHC string the way credentials are
/// stored. Used by provisioning tooling and test fixtures.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?
        .to_string())
}

/// Identity business service independent of the web framework. Resolves a
/// username to stored credentials, verifies the password, and maps the
/// result to a `Principal`.
pub struct IdentityService {
    provider: Arc<dyn IdentityProvider>,
}

impl IdentityService {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self { Self { provider } }

    /// Authenticate a caller from plaintext credentials.
    ///
    /// # Examples
    /// ```
    /// use service::identity::{domain::Role, repository::mock::MockIdentityProvider, service::IdentityService};
    /// use std::sync::Arc;
    /// let provider = MockIdentityProvider::default().with_user("david", "devdojo", Role::User);
    /// let svc = IdentityService::new(Arc::new(provider));
    /// let principal = tokio_test::block_on(svc.authenticate("david", "devdojo")).unwrap();
    /// assert_eq!(principal.username, "david");
    /// assert_eq!(principal.role, Role::User);
    /// ```
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Principal, AuthError> {
        let user = self
            .provider
            .find_by_username(username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&user.password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        if Argon2::default().verify_password(password.as_bytes(), &parsed).is_err() {
            debug!("password mismatch");
            return Err(AuthError::Unauthorized);
        }

        let role = Role::from_db(&user.role).ok_or_else(|| AuthError::UnknownRole(user.role.clone()))?;
        Ok(Principal { username: user.username, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::repository::mock::MockIdentityProvider;

    fn service() -> IdentityService {
        let provider = MockIdentityProvider::default()
            .with_user("david", "devdojo", Role::User)
            .with_user("carlos", "devdojo", Role::Admin);
        IdentityService::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn authenticates_known_user() {
        let principal = service().authenticate("carlos", "devdojo").await.unwrap();
        assert_eq!(principal.role, Role::Admin);
    }

    #[tokio::test]
    async fn rejects_wrong_password() {
        let err = service().authenticate("david", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn rejects_unknown_user() {
        let err = service().authenticate("nobody", "devdojo").await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }
}
