//! Incoming request payloads.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use clubhub_entity::division::DivisionRole;
use clubhub_entity::team::TeamRole;

/// POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name.
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    /// Plaintext password.
    #[validate(length(min = 1))]
    pub password: String,
    /// Optional client description stored with the session.
    #[validate(length(max = 255))]
    pub device_info: Option<String>,
}

/// POST /api/auth/refresh and /api/auth/logout
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    /// The opaque refresh token.
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// POST /api/auth/register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub firstname: String,
    #[validate(length(min = 1, max = 100))]
    pub lastname: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub mobile: Option<String>,
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// PUT /api/auth/password
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password, re-checked before the change.
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

/// POST /api/persons
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePersonRequest {
    #[validate(length(min = 1, max = 100))]
    pub firstname: String,
    #[validate(length(min = 1, max = 100))]
    pub lastname: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub mobile: Option<String>,
}

/// PATCH /api/persons/{id}
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePersonRequest {
    #[validate(length(min = 1, max = 100))]
    pub firstname: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub lastname: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub mobile: Option<String>,
}

/// POST /api/persons/{id}/promote
#[derive(Debug, Deserialize, Validate)]
pub struct PromotePersonRequest {
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// POST and DELETE /api/persons/{id}/roles
#[derive(Debug, Deserialize, Validate)]
pub struct GlobalRoleRequest {
    /// Role name, e.g. "admin". Must exist in the roles table.
    #[validate(length(min = 1, max = 50))]
    pub role: String,
}

/// POST /api/divisions
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDivisionRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub parent_id: Option<Uuid>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// PATCH /api/divisions/{id}
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDivisionRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,
    /// Double option: absent = keep, null = detach into a root.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// POST /api/divisions/{id}/members
#[derive(Debug, Deserialize, Validate)]
pub struct DivisionMemberRequest {
    pub person_id: Uuid,
    #[serde(default = "default_division_role")]
    pub role: DivisionRole,
}

/// PUT /api/divisions/{id}/members/{person_id}
#[derive(Debug, Deserialize)]
pub struct DivisionMemberRoleRequest {
    pub role: DivisionRole,
}

/// POST /api/teams
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub division_id: Option<Uuid>,
    #[validate(length(max = 150))]
    pub external_org: Option<String>,
    /// Omitting this creates a proxy team.
    pub responsible_id: Option<Uuid>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// PATCH /api/teams/{id}
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(max = 150))]
    pub external_org: Option<String>,
}

/// POST /api/teams/proxy
#[derive(Debug, Deserialize, Validate)]
pub struct ProxyTeamRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(max = 150))]
    pub external_org: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// POST /api/teams/{id}/promote
#[derive(Debug, Deserialize)]
pub struct PromoteTeamRequest {
    pub responsible_id: Uuid,
    /// Division to place the promoted team under, if any.
    pub division_id: Option<Uuid>,
}

/// POST /api/teams/{id}/members
#[derive(Debug, Deserialize, Validate)]
pub struct TeamMemberRequest {
    pub person_id: Uuid,
    #[serde(default = "default_team_role")]
    pub role: TeamRole,
}

/// PUT /api/teams/{id}/members/{person_id}
#[derive(Debug, Deserialize)]
pub struct TeamMemberRoleRequest {
    pub role: TeamRole,
}

/// GET /api/persons filters.
#[derive(Debug, Default, Deserialize)]
pub struct PersonFilter {
    /// Substring match against first name, last name and email.
    pub search: Option<String>,
}

/// GET /api/divisions filters.
#[derive(Debug, Default, Deserialize)]
pub struct DivisionFilter {
    /// Restrict to children of this division.
    pub parent_id: Option<Uuid>,
    /// Restrict to top-level divisions. Takes precedence over `parent_id`.
    #[serde(default)]
    pub root_only: bool,
}

/// GET /api/teams filters.
#[derive(Debug, Default, Deserialize)]
pub struct TeamFilter {
    /// Restrict to teams owned by this division.
    pub division_id: Option<Uuid>,
    /// Restrict to proxy teams (no responsible person yet).
    #[serde(default)]
    pub proxy_only: bool,
}

/// Distinguish an absent field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn default_division_role() -> DivisionRole {
    DivisionRole::Member
}

fn default_team_role() -> TeamRole {
    TeamRole::Player
}
