use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::non_empty;
use crate::error::DomainError;

/// Account role. Only admins may manage other accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

/// Profile entity - the identity record of a community member.
///
/// Rows are created by the external sign-up flow; this service only reads
/// them and updates `full_name`, `bio` and `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a profile with the default role and fresh timestamps.
    pub fn new(id: Uuid, username: Option<String>, email: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            full_name: None,
            bio: None,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Name to greet the member with: full name, then username, then "User".
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.username.as_deref())
            .unwrap_or("User")
    }
}

/// Editable profile fields. Anything else on the row is out of reach.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub bio: Option<String>,
}

impl ProfileChanges {
    /// Blank values become `None` and are written as NULL.
    pub fn new(full_name: Option<String>, bio: Option<String>) -> Self {
        Self {
            full_name: non_empty(full_name),
            bio: non_empty(bio),
        }
    }
}
