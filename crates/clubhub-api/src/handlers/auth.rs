//! Auth handlers: login, refresh, logout, registration, profile.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use clubhub_core::error::AppError;
use clubhub_entity::person::CreatePerson;
use clubhub_entity::user::GlobalRole;

use super::validate;
use crate::dto::request::{ChangePasswordRequest, LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{
    ApiResponse, MessageResponse, ProfileResponse, RevokedSessionsResponse, TokenResponse,
    UserResponse,
};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    validate(&req)?;

    let user = state
        .accounts
        .authenticate(&req.username, &req.password)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

    let device_info = req.device_info.as_deref().or_else(|| {
        headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
    });

    let pair = state.tokens.issue(&user, device_info).await?;
    Ok(Json(ApiResponse::ok(pair.into())))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    validate(&req)?;

    let pair = state
        .tokens
        .refresh(&req.refresh_token)
        .await?
        .ok_or_else(|| AppError::unauthorized("Refresh token is invalid or expired"))?;

    Ok(Json(ApiResponse::ok(pair.into())))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    validate(&req)?;

    if !state.tokens.revoke(&req.refresh_token).await? {
        return Err(AppError::validation("Unknown refresh token"));
    }
    Ok(Json(ApiResponse::ok(MessageResponse::new("Logged out"))))
}

/// POST /api/auth/logout-all
pub async fn logout_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<RevokedSessionsResponse>>, AppError> {
    let count = state.tokens.revoke_all(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(RevokedSessionsResponse {
        message: "All sessions revoked".to_string(),
        count,
    })))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    validate(&req)?;

    let person = CreatePerson {
        firstname: req.firstname,
        lastname: req.lastname,
        email: req.email,
        mobile: req.mobile,
    };
    let user = state
        .accounts
        .register(&person, &req.username, &req.password)
        .await?;

    // Every fresh account starts with the baseline role.
    state
        .role_repo
        .assign(user.id, GlobalRole::User.as_str())
        .await?;

    let person = state
        .person_repo
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::internal("Registered account has no person row"))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::new(user, person))),
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let user = state
        .user_repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;
    let person = state
        .person_repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::internal("Account has no person row"))?;
    let roles = state.role_repo.roles_of(auth.user_id).await?;

    Ok(Json(ApiResponse::ok(ProfileResponse {
        user: UserResponse::new(user, person),
        roles,
    })))
}

/// PUT /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    validate(&req)?;

    let user = state
        .user_repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

    state
        .accounts
        .authenticate(&user.username, &req.current_password)
        .await?
        .ok_or_else(|| AppError::unauthorized("Current password is incorrect"))?;

    state
        .accounts
        .change_password(auth.user_id, &req.new_password)
        .await?;

    // Changing the password ends every other session.
    state.tokens.revoke_all(auth.user_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed",
    ))))
}
