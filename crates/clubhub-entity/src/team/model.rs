//! Team entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A team within (or outside) the division hierarchy.
///
/// A team without a responsible person is a proxy: a placeholder created
/// ahead of time and promoted to a real team later. A team without a
/// division belongs to an external organization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    /// Unique team identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Owning division, `None` for an external team.
    pub division_id: Option<Uuid>,
    /// Name of the external organization, for teams outside the hierarchy.
    pub external_org: Option<String>,
    /// Person responsible for the team, `None` for a proxy team.
    pub responsible_id: Option<Uuid>,
    /// When a proxy team was promoted to a real team.
    pub promoted_at: Option<DateTime<Utc>>,
    /// Optional description.
    pub description: Option<String>,
    /// When the team was created.
    pub created_at: DateTime<Utc>,
    /// When the team was last modified.
    pub modified_at: DateTime<Utc>,
}

impl Team {
    /// Whether this team is a proxy awaiting promotion.
    pub fn is_proxy(&self) -> bool {
        self.responsible_id.is_none()
    }

    /// Whether this team belongs to an external organization.
    pub fn is_external(&self) -> bool {
        self.division_id.is_none()
    }
}

/// Data required to create a new team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeam {
    /// Display name.
    pub name: String,
    /// Owning division (optional).
    pub division_id: Option<Uuid>,
    /// External organization name (optional).
    pub external_org: Option<String>,
    /// Responsible person. Omitting this creates a proxy team.
    pub responsible_id: Option<Uuid>,
    /// Description (optional).
    pub description: Option<String>,
}

/// Data for updating an existing team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTeam {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New external organization name.
    pub external_org: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(division_id: Option<Uuid>, responsible_id: Option<Uuid>) -> Team {
        Team {
            id: Uuid::new_v4(),
            name: "U15".to_string(),
            division_id,
            external_org: None,
            responsible_id,
            promoted_at: None,
            description: None,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }

    #[test]
    fn team_without_responsible_is_proxy() {
        assert!(team(Some(Uuid::new_v4()), None).is_proxy());
        assert!(!team(Some(Uuid::new_v4()), Some(Uuid::new_v4())).is_proxy());
    }

    #[test]
    fn team_without_division_is_external() {
        assert!(team(None, Some(Uuid::new_v4())).is_external());
        assert!(!team(Some(Uuid::new_v4()), Some(Uuid::new_v4())).is_external());
    }
}
