//! User account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A login account attached to a person.
///
/// Users share their primary key with the person they belong to, so a user id
/// is always also a person id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// User identifier. Equal to the owning person's id.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Last successful login time.
    pub last_login: Option<DateTime<Utc>>,
}
