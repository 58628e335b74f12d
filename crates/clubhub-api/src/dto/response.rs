//! Outgoing response payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clubhub_auth::token::TokenPair;
use clubhub_entity::person::Person;
use clubhub_entity::user::User;

/// Generic envelope wrapping every successful response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true`; errors use [`crate::error::ApiErrorResponse`].
    pub success: bool,
    /// The payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in a success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Confirmation of a bulk session revocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokedSessionsResponse {
    pub message: String,
    /// Number of refresh tokens revoked.
    pub count: u64,
}

/// One node of the division tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionTreeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    /// Direct sub-divisions, recursively.
    pub children: Vec<DivisionTreeResponse>,
}

/// Issued token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "bearer".to_string(),
            access_expires_at: pair.access_expires_at,
            refresh_expires_at: pair.refresh_expires_at,
        }
    }
}

/// Public view of a user account together with its person record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub person: Person,
}

impl UserResponse {
    /// Combine a user row with its person row. The two share a primary key.
    pub fn new(user: User, person: Person) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_active: user.is_active,
            last_login: user.last_login,
            person,
        }
    }
}

/// A user together with their global role names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub roles: Vec<String>,
}
