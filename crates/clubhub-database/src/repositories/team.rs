//! Team repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_core::types::pagination::{Page, Paginated};
use clubhub_entity::team::{CreateTeam, Team, TeamMembership, TeamRole, UpdateTeam};

/// Repository for team CRUD, promotion and membership operations.
#[derive(Debug, Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    /// Create a new team repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a team by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Team>> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find team by id", e))
    }

    /// List teams with pagination, optionally filtered by owning division
    /// or restricted to proxy teams.
    pub async fn find_all(
        &self,
        page: &Page,
        division_id: Option<Uuid>,
        proxy_only: bool,
    ) -> AppResult<Paginated<Team>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM teams \
             WHERE ($1::uuid IS NULL OR division_id = $1) \
               AND (NOT $2 OR responsible_id IS NULL)",
        )
        .bind(division_id)
        .bind(proxy_only)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count teams", e))?;

        let teams = sqlx::query_as::<_, Team>(
            "SELECT * FROM teams \
             WHERE ($1::uuid IS NULL OR division_id = $1) \
               AND (NOT $2 OR responsible_id IS NULL) \
             ORDER BY name LIMIT $3 OFFSET $4",
        )
        .bind(division_id)
        .bind(proxy_only)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list teams", e))?;

        Ok(Paginated::new(teams, page, total as u64))
    }

    /// List the teams owned by a division.
    pub async fn find_by_division(&self, division_id: Uuid) -> AppResult<Vec<Team>> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE division_id = $1 ORDER BY name")
            .bind(division_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list division teams", e)
            })
    }

    /// Create a new team.
    ///
    /// A team created without a responsible person is a proxy. A team
    /// created with one gets its promotion time stamped immediately.
    pub async fn create(&self, data: &CreateTeam) -> AppResult<Team> {
        sqlx::query_as::<_, Team>(
            "INSERT INTO teams (name, division_id, external_org, responsible_id, promoted_at, description) \
             VALUES ($1, $2, $3, $4, CASE WHEN $4::uuid IS NULL THEN NULL ELSE NOW() END, $5) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(data.division_id)
        .bind(&data.external_org)
        .bind(data.responsible_id)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("teams_division_id_fkey") =>
            {
                AppError::not_found("Division not found".to_string())
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("teams_responsible_id_fkey") =>
            {
                AppError::not_found("Responsible person not found".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create team", e),
        })
    }

    /// Update a team's fields.
    pub async fn update(&self, id: Uuid, data: &UpdateTeam) -> AppResult<Team> {
        sqlx::query_as::<_, Team>(
            "UPDATE teams SET name = COALESCE($2, name), \
                              description = COALESCE($3, description), \
                              external_org = COALESCE($4, external_org), \
                              modified_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.external_org)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update team", e))?
        .ok_or_else(|| AppError::not_found(format!("Team {id} not found")))
    }

    /// Promote a proxy team by assigning a responsible person and,
    /// optionally, an owning division.
    ///
    /// Returns `None` when the team does not exist or already has a
    /// responsible person. The guard in the WHERE clause makes concurrent
    /// promotions race-safe; exactly one caller wins.
    pub async fn promote(
        &self,
        id: Uuid,
        responsible_id: Uuid,
        division_id: Option<Uuid>,
    ) -> AppResult<Option<Team>> {
        sqlx::query_as::<_, Team>(
            "UPDATE teams SET responsible_id = $2, \
                              division_id = COALESCE($3, division_id), \
                              promoted_at = NOW(), modified_at = NOW() \
             WHERE id = $1 AND responsible_id IS NULL RETURNING *",
        )
        .bind(id)
        .bind(responsible_id)
        .bind(division_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("teams_responsible_id_fkey") =>
            {
                AppError::not_found("Responsible person not found".to_string())
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("teams_division_id_fkey") =>
            {
                AppError::not_found("Division not found".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to promote team", e),
        })
    }

    /// Delete a team. Returns `true` when a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete team", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Add a person to a team with the given role.
    pub async fn add_member(
        &self,
        team_id: Uuid,
        person_id: Uuid,
        role: TeamRole,
    ) -> AppResult<TeamMembership> {
        sqlx::query_as::<_, TeamMembership>(
            "INSERT INTO team_members (team_id, person_id, role) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(team_id)
        .bind(person_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("uq_team_member") => {
                AppError::conflict("Person is already a member of this team".to_string())
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("team_members_team_id_fkey") =>
            {
                AppError::not_found(format!("Team {team_id} not found"))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("team_members_person_id_fkey") =>
            {
                AppError::not_found(format!("Person {person_id} not found"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to add team member", e),
        })
    }

    /// Change a member's role within a team.
    pub async fn update_member_role(
        &self,
        team_id: Uuid,
        person_id: Uuid,
        role: TeamRole,
    ) -> AppResult<TeamMembership> {
        sqlx::query_as::<_, TeamMembership>(
            "UPDATE team_members SET role = $3 \
             WHERE team_id = $1 AND person_id = $2 RETURNING *",
        )
        .bind(team_id)
        .bind(person_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update member role", e)
        })?
        .ok_or_else(|| AppError::not_found("Team membership not found".to_string()))
    }

    /// Remove a person from a team. Returns `true` when a row was removed.
    pub async fn remove_member(&self, team_id: Uuid, person_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND person_id = $2")
                .bind(team_id)
                .bind(person_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to remove member", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// List a team's memberships.
    pub async fn members(&self, team_id: Uuid) -> AppResult<Vec<TeamMembership>> {
        sqlx::query_as::<_, TeamMembership>(
            "SELECT * FROM team_members WHERE team_id = $1 ORDER BY created_at",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }

    /// List every team membership a person holds.
    pub async fn memberships_of_person(&self, person_id: Uuid) -> AppResult<Vec<TeamMembership>> {
        sqlx::query_as::<_, TeamMembership>("SELECT * FROM team_members WHERE person_id = $1")
            .bind(person_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list person memberships", e)
            })
    }

    /// Return a person's role in a team, if they are a member.
    pub async fn member_role(
        &self,
        team_id: Uuid,
        person_id: Uuid,
    ) -> AppResult<Option<TeamRole>> {
        sqlx::query_scalar(
            "SELECT role FROM team_members WHERE team_id = $1 AND person_id = $2",
        )
        .bind(team_id)
        .bind(person_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up member role", e))
    }
}
