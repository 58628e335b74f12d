//! Person handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use clubhub_core::error::AppError;
use clubhub_core::types::pagination::{Page, Paginated};
use clubhub_entity::person::{CreatePerson, Person, UpdatePerson};

use super::{forbidden, validate};
use crate::dto::request::{
    CreatePersonRequest, GlobalRoleRequest, PersonFilter, PromotePersonRequest,
    UpdatePersonRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/persons
///
/// The member directory is readable by any authenticated user. A `search`
/// term narrows the listing by name or email.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<Page>,
    Query(filter): Query<PersonFilter>,
) -> Result<Json<ApiResponse<Paginated<Person>>>, AppError> {
    let persons = match filter.search.as_deref() {
        Some(term) if !term.is_empty() => state.person_repo.search(term, &page).await?,
        _ => state.person_repo.find_all(&page).await?,
    };
    Ok(Json(ApiResponse::ok(persons)))
}

/// GET /api/persons/{id}
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Person>>, AppError> {
    let person = state
        .person_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Person {id} not found")))?;
    Ok(Json(ApiResponse::ok(person)))
}

/// POST /api/persons
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePersonRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Person>>), AppError> {
    validate(&req)?;
    if !state.permissions.is_elevated(auth.user_id).await? {
        return Err(forbidden());
    }

    let person = state
        .person_repo
        .create(&CreatePerson {
            firstname: req.firstname,
            lastname: req.lastname,
            email: req.email,
            mobile: req.mobile,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(person))))
}

/// PATCH /api/persons/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePersonRequest>,
) -> Result<Json<ApiResponse<Person>>, AppError> {
    validate(&req)?;
    if !state.permissions.can_manage_person(auth.user_id, id).await? {
        return Err(forbidden());
    }

    let person = state
        .person_repo
        .update(
            id,
            &UpdatePerson {
                firstname: req.firstname,
                lastname: req.lastname,
                email: req.email,
                mobile: req.mobile,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(person)))
}

/// DELETE /api/persons/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    if !state.permissions.is_elevated(auth.user_id).await? {
        return Err(forbidden());
    }

    if !state.person_repo.delete(id).await? {
        return Err(AppError::not_found(format!("Person {id} not found")));
    }
    Ok(Json(ApiResponse::ok(MessageResponse::new("Person deleted"))))
}

/// POST /api/persons/{id}/promote
///
/// Attach a login account to an existing person.
pub async fn promote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PromotePersonRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    validate(&req)?;
    if !state.permissions.is_elevated(auth.user_id).await? {
        return Err(forbidden());
    }

    let person = state
        .person_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Person {id} not found")))?;

    let user = state
        .accounts
        .promote_person(id, &req.username, &req.password)
        .await?
        .ok_or_else(|| AppError::conflict("Person already has an account"))?;

    state
        .role_repo
        .assign(user.id, clubhub_entity::user::GlobalRole::User.as_str())
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::new(user, person))))
}

/// POST /api/persons/{id}/roles
pub async fn assign_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<GlobalRoleRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    validate(&req)?;
    if !state.permissions.is_elevated(auth.user_id).await? {
        return Err(forbidden());
    }

    state.role_repo.assign(id, &req.role).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Role assigned"))))
}

/// DELETE /api/persons/{id}/roles
pub async fn remove_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<GlobalRoleRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    validate(&req)?;
    if !state.permissions.is_elevated(auth.user_id).await? {
        return Err(forbidden());
    }

    if !state.role_repo.remove(id, &req.role).await? {
        return Err(AppError::not_found("Role assignment not found"));
    }
    Ok(Json(ApiResponse::ok(MessageResponse::new("Role removed"))))
}
