use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of roles a caller may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => models::catalog_user::ROLE_USER,
            Role::Admin => models::catalog_user::ROLE_ADMIN,
        }
    }

    pub fn from_db(s: &str) -> Option<Role> {
        match s {
            models::catalog_user::ROLE_USER => Some(Role::User),
            models::catalog_user::ROLE_ADMIN => Some(Role::Admin),
            _ => None,
        }
    }

    /// Capability check: admins satisfy every requirement, users only
    /// user-level ones.
    pub fn satisfies(self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::User, Role::User) => true,
            (Role::User, Role::Admin) => false,
        }
    }
}

/// An authenticated caller. Resolved once per request and handed to the
/// authorization gate; the entry service never sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub role: Role,
}

impl Principal {
    pub fn has_role(&self, required: Role) -> bool {
        self.role.satisfies(required)
    }
}

/// Stored credentials as the identity provider hands them out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_satisfies_everything() {
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(Role::Admin.satisfies(Role::User));
    }

    #[test]
    fn user_does_not_satisfy_admin() {
        assert!(Role::User.satisfies(Role::User));
        assert!(!Role::User.satisfies(Role::Admin));
    }

    #[test]
    fn role_round_trips_through_db_strings() {
        assert_eq!(Role::from_db(Role::Admin.as_str()), Some(Role::Admin));
        assert_eq!(Role::from_db(Role::User.as_str()), Some(Role::User));
        assert_eq!(Role::from_db("ROOT"), None);
    }
}
