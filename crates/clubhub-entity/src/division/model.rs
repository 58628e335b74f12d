//! Division entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An organizational unit.
///
/// Divisions form a tree via `parent_id`. A division with no parent is a
/// root of the hierarchy. Authority granted on a division applies to all of
/// its descendants.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Division {
    /// Unique division identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Parent division, `None` for a root.
    pub parent_id: Option<Uuid>,
    /// Optional description.
    pub description: Option<String>,
    /// When the division was created.
    pub created_at: DateTime<Utc>,
    /// When the division was last modified.
    pub modified_at: DateTime<Utc>,
}

impl Division {
    /// Whether this division is a root of the hierarchy.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new division.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDivision {
    /// Display name.
    pub name: String,
    /// Parent division (optional).
    pub parent_id: Option<Uuid>,
    /// Description (optional).
    pub description: Option<String>,
}

/// Data for updating an existing division.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDivision {
    /// New display name.
    pub name: Option<String>,
    /// New parent division. The outer `Option` distinguishes "leave as is"
    /// from "set", and `Some(None)` detaches the division into a root.
    pub parent_id: Option<Option<Uuid>>,
    /// New description.
    pub description: Option<String>,
}
