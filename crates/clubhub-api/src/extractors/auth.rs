//! `AuthUser` extractor — pulls the JWT from the Authorization header and
//! validates it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use clubhub_core::error::AppError;

use crate::state::AppState;

/// Authenticated caller context available to handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's user id (also their person id).
    pub user_id: Uuid,
    /// Username from the token claims.
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state
            .jwt_decoder
            .decode_access_token(token)
            .ok_or_else(|| AppError::unauthorized("Invalid or expired access token"))?;

        // The account is re-checked on every request, so deactivating a
        // user takes effect before their access token expires.
        let user = state
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;
        if !user.is_active {
            return Err(AppError::unauthorized("Account is deactivated"));
        }

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
        })
    }
}
