//! Global (organization-wide) roles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The well-known organization-wide roles.
///
/// Roles are stored by name in the `roles` table; this enum covers the set
/// the permission engine reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalRole {
    /// Organization administrator.
    Admin,
    /// Regular account.
    User,
    /// Read-only account.
    Readonly,
    /// Full system superuser.
    Superuser,
}

impl GlobalRole {
    /// Whether this role grants elevated (organization-wide) privileges.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::Admin | Self::Superuser)
    }

    /// Return the role name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Readonly => "readonly",
            Self::Superuser => "superuser",
        }
    }
}

impl fmt::Display for GlobalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GlobalRole {
    type Err = clubhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "readonly" => Ok(Self::Readonly),
            "superuser" => Ok(Self::Superuser),
            _ => Err(clubhub_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, user, readonly, superuser"
            ))),
        }
    }
}

/// A role row as stored in the `roles` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique role name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Assignment of a global role to a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRoleAssignment {
    /// Unique assignment identifier.
    pub id: Uuid,
    /// The user holding the role.
    pub user_id: Uuid,
    /// The role being held.
    pub role_id: Uuid,
    /// When the role was granted.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevated_roles() {
        assert!(GlobalRole::Admin.is_elevated());
        assert!(GlobalRole::Superuser.is_elevated());
        assert!(!GlobalRole::User.is_elevated());
        assert!(!GlobalRole::Readonly.is_elevated());
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [
            GlobalRole::Admin,
            GlobalRole::User,
            GlobalRole::Readonly,
            GlobalRole::Superuser,
        ] {
            assert_eq!(role.as_str().parse::<GlobalRole>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("owner".parse::<GlobalRole>().is_err());
    }
}
