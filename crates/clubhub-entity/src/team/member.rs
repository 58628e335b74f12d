//! Team membership and roles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role a person holds within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "team_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    /// Playing member.
    Player,
    /// Coaching staff.
    Coach,
    /// Team manager.
    Manager,
    /// Medical staff.
    Medic,
    /// Other supporting staff.
    Staff,
}

impl TeamRole {
    /// Whether this role grants management authority over the team.
    pub fn is_managing(&self) -> bool {
        matches!(self, Self::Manager | Self::Coach)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Coach => "coach",
            Self::Manager => "manager",
            Self::Medic => "medic",
            Self::Staff => "staff",
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TeamRole {
    type Err = clubhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "player" => Ok(Self::Player),
            "coach" => Ok(Self::Coach),
            "manager" => Ok(Self::Manager),
            "medic" => Ok(Self::Medic),
            "staff" => Ok(Self::Staff),
            _ => Err(clubhub_core::AppError::validation(format!(
                "Invalid team role: '{s}'. Expected one of: player, coach, manager, medic, staff"
            ))),
        }
    }
}

/// A person's membership in a team.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeamMembership {
    /// Unique membership identifier.
    pub id: Uuid,
    /// The team.
    pub team_id: Uuid,
    /// The member.
    pub person_id: Uuid,
    /// The member's role in the team.
    pub role: TeamRole,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managing_team_roles() {
        assert!(TeamRole::Manager.is_managing());
        assert!(TeamRole::Coach.is_managing());
        assert!(!TeamRole::Player.is_managing());
        assert!(!TeamRole::Medic.is_managing());
        assert!(!TeamRole::Staff.is_managing());
    }

    #[test]
    fn parse_team_role() {
        assert_eq!("Coach".parse::<TeamRole>().unwrap(), TeamRole::Coach);
        assert!("referee".parse::<TeamRole>().is_err());
    }
}
