use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::domain::StoredUser;
use super::errors::AuthError;

/// Identity provider abstraction: username to stored credentials and role.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError>;
}

/// SeaORM-backed identity provider over the catalog_user table.
pub struct SeaOrmIdentityProvider {
    pub db: DatabaseConnection,
}

#[async_trait]
impl IdentityProvider for SeaOrmIdentityProvider {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError> {
        let found = models::catalog_user::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Db(e.to_string()))?;
        Ok(found.map(|u| StoredUser {
            id: u.id,
            username: u.username,
            password_hash: u.password_hash,
            role: u.role,
        }))
    }
}

/// Simple in-memory provider for tests and doc examples.
pub mod mock {
    use super::*;
    use crate::identity::domain::Role;
    use crate::identity::service::hash_password;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockIdentityProvider {
        users: Mutex<HashMap<String, StoredUser>>,
    }

    impl MockIdentityProvider {
        /// Builder-style registration; hashes the plaintext password the
        /// same way production credentials are stored.
        pub fn with_user(self, username: &str, password: &str, role: Role) -> Self {
            let hash = hash_password(password).expect("hash password");
            self.users.lock().unwrap().insert(
                username.to_string(),
                StoredUser {
                    id: Uuid::new_v4(),
                    username: username.to_string(),
                    password_hash: hash,
                    role: role.as_str().to_string(),
                },
            );
            self
        }
    }

    #[async_trait]
    impl IdentityProvider for MockIdentityProvider {
        async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError> {
            Ok(self.users.lock().unwrap().get(username).cloned())
        }
    }
}
