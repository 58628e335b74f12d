//! Team handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use clubhub_core::error::AppError;
use clubhub_core::types::pagination::{Page, Paginated};
use clubhub_entity::team::{CreateTeam, Team, TeamMembership, UpdateTeam};

use super::{forbidden, validate};
use crate::dto::request::{
    CreateTeamRequest, PromoteTeamRequest, ProxyTeamRequest, TeamFilter, TeamMemberRequest,
    TeamMemberRoleRequest, UpdateTeamRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/teams
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<Page>,
    Query(filter): Query<TeamFilter>,
) -> Result<Json<ApiResponse<Paginated<Team>>>, AppError> {
    let teams = state
        .team_repo
        .find_all(&page, filter.division_id, filter.proxy_only)
        .await?;
    Ok(Json(ApiResponse::ok(teams)))
}

/// GET /api/teams/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Team>>, AppError> {
    let team = state
        .team_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Team {id} not found")))?;

    if !state.permissions.can_view_team(auth.user_id, id).await? {
        return Err(forbidden());
    }
    Ok(Json(ApiResponse::ok(team)))
}

/// POST /api/teams
///
/// Creating a team inside a division requires management of that division;
/// creating an external team requires an elevated role.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Team>>), AppError> {
    validate(&req)?;

    let allowed = match req.division_id {
        Some(division_id) => {
            state
                .permissions
                .can_manage_division(auth.user_id, division_id)
                .await?
        }
        None => state.permissions.is_elevated(auth.user_id).await?,
    };
    if !allowed {
        return Err(forbidden());
    }

    let team = state
        .team_repo
        .create(&CreateTeam {
            name: req.name,
            division_id: req.division_id,
            external_org: req.external_org,
            responsible_id: req.responsible_id,
            description: req.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(team))))
}

/// PATCH /api/teams/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<Json<ApiResponse<Team>>, AppError> {
    validate(&req)?;
    if !state.permissions.can_manage_team(auth.user_id, id).await? {
        return Err(forbidden());
    }

    let team = state
        .team_repo
        .update(
            id,
            &UpdateTeam {
                name: req.name,
                description: req.description,
                external_org: req.external_org,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(team)))
}

/// POST /api/teams/proxy
///
/// Create a placeholder for an external team, with no responsible person
/// and no division. Any authenticated user may create one.
pub async fn create_proxy(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<ProxyTeamRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Team>>), AppError> {
    validate(&req)?;

    let team = state
        .team_repo
        .create(&CreateTeam {
            name: req.name,
            division_id: None,
            external_org: req.external_org,
            responsible_id: None,
            description: req.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(team))))
}

/// POST /api/teams/{id}/promote
///
/// Assign a responsible person (and optionally a division) to a proxy
/// team. Exactly one of two racing promotions wins; the loser sees a
/// conflict.
pub async fn promote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PromoteTeamRequest>,
) -> Result<Json<ApiResponse<Team>>, AppError> {
    // Placing the team under a division requires authority over it.
    if let Some(division_id) = req.division_id
        && !state
            .permissions
            .can_manage_division(auth.user_id, division_id)
            .await?
    {
        return Err(forbidden());
    }

    if state.team_repo.find_by_id(id).await?.is_none() {
        return Err(AppError::not_found(format!("Team {id} not found")));
    }

    let team = state
        .team_repo
        .promote(id, req.responsible_id, req.division_id)
        .await?
        .ok_or_else(|| AppError::conflict("Team already has a responsible person"))?;

    Ok(Json(ApiResponse::ok(team)))
}

/// DELETE /api/teams/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    if !state.permissions.can_manage_team(auth.user_id, id).await? {
        return Err(forbidden());
    }

    if !state.team_repo.delete(id).await? {
        return Err(AppError::not_found(format!("Team {id} not found")));
    }
    Ok(Json(ApiResponse::ok(MessageResponse::new("Team deleted"))))
}

/// GET /api/teams/{id}/members
pub async fn members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TeamMembership>>>, AppError> {
    if !state.permissions.can_view_team(auth.user_id, id).await? {
        return Err(forbidden());
    }
    let members = state.team_repo.members(id).await?;
    Ok(Json(ApiResponse::ok(members)))
}

/// POST /api/teams/{id}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<TeamMemberRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TeamMembership>>), AppError> {
    if !state.permissions.can_manage_team(auth.user_id, id).await? {
        return Err(forbidden());
    }
    let membership = state
        .team_repo
        .add_member(id, req.person_id, req.role)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(membership))))
}

/// PUT /api/teams/{id}/members/{person_id}
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, person_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<TeamMemberRoleRequest>,
) -> Result<Json<ApiResponse<TeamMembership>>, AppError> {
    if !state.permissions.can_manage_team(auth.user_id, id).await? {
        return Err(forbidden());
    }
    let membership = state
        .team_repo
        .update_member_role(id, person_id, req.role)
        .await?;
    Ok(Json(ApiResponse::ok(membership)))
}

/// DELETE /api/teams/{id}/members/{person_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, person_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    if !state.permissions.can_manage_team(auth.user_id, id).await? {
        return Err(forbidden());
    }
    if !state.team_repo.remove_member(id, person_id).await? {
        return Err(AppError::not_found("Team membership not found"));
    }
    Ok(Json(ApiResponse::ok(MessageResponse::new("Member removed"))))
}
