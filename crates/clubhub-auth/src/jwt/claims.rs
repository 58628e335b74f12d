//! JWT claims embedded in access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject, the user id.
    pub sub: Uuid,
    /// Username at issuance time.
    pub username: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token type discriminator, always `"access"`.
    ///
    /// Guards against some other signed payload (with the same secret)
    /// being presented as an access token.
    #[serde(rename = "type")]
    pub token_type: String,
}

impl AccessClaims {
    /// The type value carried by every access token.
    pub const TOKEN_TYPE: &'static str = "access";
}

impl AccessClaims {
    /// The user id from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// The expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
