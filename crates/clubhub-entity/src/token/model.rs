//! Refresh token model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Durable record of an issued refresh token.
///
/// Only the SHA-256 hash of the opaque token is stored; the raw token is
/// returned to the client exactly once and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Unique record identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// SHA-256 hash of the opaque token, hex-encoded.
    #[serde(skip_serializing)]
    pub token_hash: String,
    /// Free-form client description (user agent, device name).
    pub device_info: Option<String>,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// When the token was revoked, if it has been.
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Whether the token has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Whether the token has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Whether the token may still be redeemed.
    pub fn is_valid(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn token(expires_at: DateTime<Utc>, revoked_at: Option<DateTime<Utc>>) -> RefreshToken {
        RefreshToken {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_hash: "deadbeef".to_string(),
            device_info: None,
            created_at: Utc::now(),
            expires_at,
            revoked_at,
        }
    }

    #[test]
    fn fresh_token_is_valid() {
        let t = token(Utc::now() + Duration::days(7), None);
        assert!(t.is_valid());
        assert!(!t.is_revoked());
        assert!(!t.is_expired());
    }

    #[test]
    fn expired_token_is_invalid() {
        let t = token(Utc::now() - Duration::seconds(1), None);
        assert!(t.is_expired());
        assert!(!t.is_valid());
    }

    #[test]
    fn revoked_token_is_invalid_even_before_expiry() {
        let t = token(Utc::now() + Duration::days(7), Some(Utc::now()));
        assert!(t.is_revoked());
        assert!(!t.is_valid());
    }
}
