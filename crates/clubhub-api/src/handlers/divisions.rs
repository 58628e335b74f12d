//! Division handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use clubhub_core::error::AppError;
use clubhub_core::types::pagination::{Page, Paginated};
use clubhub_entity::division::{
    CreateDivision, Division, DivisionMembership, UpdateDivision,
};
use clubhub_entity::team::Team;

use super::{forbidden, validate};
use crate::dto::request::{
    CreateDivisionRequest, DivisionFilter, DivisionMemberRequest, DivisionMemberRoleRequest,
    UpdateDivisionRequest,
};
use crate::dto::response::{ApiResponse, DivisionTreeResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/divisions
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<Page>,
    Query(filter): Query<DivisionFilter>,
) -> Result<Json<ApiResponse<Paginated<Division>>>, AppError> {
    let divisions = state
        .division_repo
        .find_all(&page, filter.parent_id, filter.root_only)
        .await?;
    Ok(Json(ApiResponse::ok(divisions)))
}

/// GET /api/divisions/tree
///
/// The whole division forest as nested nodes.
pub async fn tree(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<DivisionTreeResponse>>>, AppError> {
    let divisions = state.division_repo.find_all_unpaged().await?;
    Ok(Json(ApiResponse::ok(build_tree(&divisions, None))))
}

/// Assemble the subtree rooted at `parent_id` from a flat division list.
fn build_tree(divisions: &[Division], parent_id: Option<Uuid>) -> Vec<DivisionTreeResponse> {
    divisions
        .iter()
        .filter(|d| d.parent_id == parent_id)
        .map(|d| DivisionTreeResponse {
            id: d.id,
            name: d.name.clone(),
            description: d.description.clone(),
            parent_id: d.parent_id,
            children: build_tree(divisions, Some(d.id)),
        })
        .collect()
}

/// GET /api/divisions/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Division>>, AppError> {
    let division = state
        .division_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Division {id} not found")))?;

    if !state.permissions.can_view_division(auth.user_id, id).await? {
        return Err(forbidden());
    }
    Ok(Json(ApiResponse::ok(division)))
}

/// GET /api/divisions/{id}/children
pub async fn children(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Division>>>, AppError> {
    if !state.permissions.can_view_division(auth.user_id, id).await? {
        return Err(forbidden());
    }
    let children = state.division_repo.children_of(id).await?;
    Ok(Json(ApiResponse::ok(children)))
}

/// GET /api/divisions/{id}/teams
pub async fn teams(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Team>>>, AppError> {
    if !state.permissions.can_view_division(auth.user_id, id).await? {
        return Err(forbidden());
    }
    let teams = state.team_repo.find_by_division(id).await?;
    Ok(Json(ApiResponse::ok(teams)))
}

/// POST /api/divisions
///
/// Creating a root division requires an elevated role; creating a child
/// requires management of the parent.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateDivisionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Division>>), AppError> {
    validate(&req)?;

    let allowed = match req.parent_id {
        Some(parent_id) => {
            state
                .permissions
                .can_manage_division(auth.user_id, parent_id)
                .await?
        }
        None => state.permissions.is_elevated(auth.user_id).await?,
    };
    if !allowed {
        return Err(forbidden());
    }

    let division = state
        .division_repo
        .create(&CreateDivision {
            name: req.name,
            parent_id: req.parent_id,
            description: req.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(division))))
}

/// PATCH /api/divisions/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDivisionRequest>,
) -> Result<Json<ApiResponse<Division>>, AppError> {
    validate(&req)?;
    if !state
        .permissions
        .can_manage_division(auth.user_id, id)
        .await?
    {
        return Err(forbidden());
    }

    // Re-parenting must keep the hierarchy a tree.
    if let Some(Some(new_parent)) = req.parent_id {
        if state.hierarchy.would_create_cycle(id, new_parent).await? {
            return Err(AppError::conflict(
                "Moving the division under one of its descendants would create a cycle",
            ));
        }
        if !state
            .permissions
            .can_manage_division(auth.user_id, new_parent)
            .await?
        {
            return Err(forbidden());
        }
    }

    let division = state
        .division_repo
        .update(
            id,
            &UpdateDivision {
                name: req.name,
                parent_id: req.parent_id,
                description: req.description,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(division)))
}

/// DELETE /api/divisions/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    if !state
        .permissions
        .can_manage_division(auth.user_id, id)
        .await?
    {
        return Err(forbidden());
    }

    if !state.division_repo.delete(id).await? {
        return Err(AppError::not_found(format!("Division {id} not found")));
    }
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Division deleted",
    ))))
}

/// GET /api/divisions/{id}/members
pub async fn members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<DivisionMembership>>>, AppError> {
    if !state.permissions.can_view_division(auth.user_id, id).await? {
        return Err(forbidden());
    }
    let members = state.division_repo.members(id).await?;
    Ok(Json(ApiResponse::ok(members)))
}

/// POST /api/divisions/{id}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<DivisionMemberRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DivisionMembership>>), AppError> {
    if !state
        .permissions
        .can_manage_division(auth.user_id, id)
        .await?
    {
        return Err(forbidden());
    }
    let membership = state
        .division_repo
        .add_member(id, req.person_id, req.role)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(membership))))
}

/// PUT /api/divisions/{id}/members/{person_id}
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, person_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<DivisionMemberRoleRequest>,
) -> Result<Json<ApiResponse<DivisionMembership>>, AppError> {
    if !state
        .permissions
        .can_manage_division(auth.user_id, id)
        .await?
    {
        return Err(forbidden());
    }
    let membership = state
        .division_repo
        .update_member_role(id, person_id, req.role)
        .await?;
    Ok(Json(ApiResponse::ok(membership)))
}

/// DELETE /api/divisions/{id}/members/{person_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, person_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    if !state
        .permissions
        .can_manage_division(auth.user_id, id)
        .await?
    {
        return Err(forbidden());
    }
    if !state.division_repo.remove_member(id, person_id).await? {
        return Err(AppError::not_found("Division membership not found"));
    }
    Ok(Json(ApiResponse::ok(MessageResponse::new("Member removed"))))
}
