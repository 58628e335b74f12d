//! Division membership and roles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role a person holds within a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "division_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DivisionRole {
    /// Ordinary member.
    Member,
    /// Runs day-to-day operations; no structural authority.
    Manager,
    /// May manage the division and everything below it.
    Admin,
}

impl DivisionRole {
    /// Whether this role grants management authority over the division.
    ///
    /// Only the division admin role does; the manager role is an
    /// organizational label without structural authority.
    pub fn is_managing(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for DivisionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DivisionRole {
    type Err = clubhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(clubhub_core::AppError::validation(format!(
                "Invalid division role: '{s}'. Expected one of: member, manager, admin"
            ))),
        }
    }
}

/// A person's membership in a division.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DivisionMembership {
    /// Unique membership identifier.
    pub id: Uuid,
    /// The division.
    pub division_id: Uuid,
    /// The member.
    pub person_id: Uuid,
    /// The member's role in the division.
    pub role: DivisionRole,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_manages() {
        assert!(DivisionRole::Admin.is_managing());
        assert!(!DivisionRole::Manager.is_managing());
        assert!(!DivisionRole::Member.is_managing());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "MANAGER".parse::<DivisionRole>().unwrap(),
            DivisionRole::Manager
        );
        assert!("coach".parse::<DivisionRole>().is_err());
    }
}
