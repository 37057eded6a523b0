//! Account entity backing the account directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Authorization role carried by an account and its bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// All roles seeded at startup.
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Role::User),
            "Admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    /// `None` until a role has been assigned.
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Role used for authorization. Accounts without an assigned role act as users.
    pub fn effective_role(&self) -> Role {
        self.role.unwrap_or(Role::User)
    }
}

/// Input data for creating an account. The role is assigned separately.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Resolved caller identity extracted from a bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_effective_role_defaults_to_user() {
        let account = Account {
            id: Uuid::new_v4(),
            email: "a@b.com".into(),
            username: "a".into(),
            password_hash: String::new(),
            role: None,
            created_at: Utc::now(),
        };
        assert_eq!(account.effective_role(), Role::User);
    }

    #[test]
    fn test_identity_is_admin() {
        let mut identity = Identity {
            user_id: Uuid::new_v4(),
            username: "root".into(),
            role: Role::Admin,
        };
        assert!(identity.is_admin());
        identity.role = Role::User;
        assert!(!identity.is_admin());
    }
}
