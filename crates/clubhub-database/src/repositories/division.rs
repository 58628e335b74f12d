//! Division repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_core::types::pagination::{Page, Paginated};
use clubhub_entity::division::{
    CreateDivision, Division, DivisionMembership, DivisionRole, UpdateDivision,
};

/// Repository for division CRUD, hierarchy and membership operations.
#[derive(Debug, Clone)]
pub struct DivisionRepository {
    pool: PgPool,
}

impl DivisionRepository {
    /// Create a new division repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a division by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Division>> {
        sqlx::query_as::<_, Division>("SELECT * FROM divisions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find division by id", e)
            })
    }

    /// Return a division's parent id, or `None` for a root or unknown id.
    pub async fn parent_of(&self, id: Uuid) -> AppResult<Option<Uuid>> {
        let parent: Option<Option<Uuid>> =
            sqlx::query_scalar("SELECT parent_id FROM divisions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find division parent", e)
                })?;
        Ok(parent.flatten())
    }

    /// List divisions with pagination.
    ///
    /// `root_only` restricts results to top-level divisions; otherwise
    /// `parent_id` restricts them to one division's children.
    pub async fn find_all(
        &self,
        page: &Page,
        parent_id: Option<Uuid>,
        root_only: bool,
    ) -> AppResult<Paginated<Division>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM divisions \
             WHERE CASE WHEN $2 THEN parent_id IS NULL \
                        WHEN $1::uuid IS NOT NULL THEN parent_id = $1 \
                        ELSE TRUE END",
        )
        .bind(parent_id)
        .bind(root_only)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count divisions", e))?;

        let divisions = sqlx::query_as::<_, Division>(
            "SELECT * FROM divisions \
             WHERE CASE WHEN $2 THEN parent_id IS NULL \
                        WHEN $1::uuid IS NOT NULL THEN parent_id = $1 \
                        ELSE TRUE END \
             ORDER BY name LIMIT $3 OFFSET $4",
        )
        .bind(parent_id)
        .bind(root_only)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list divisions", e))?;

        Ok(Paginated::new(divisions, page, total as u64))
    }

    /// Load the whole division forest, for tree assembly.
    pub async fn find_all_unpaged(&self) -> AppResult<Vec<Division>> {
        sqlx::query_as::<_, Division>("SELECT * FROM divisions ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load division tree", e)
            })
    }

    /// List the direct children of a division.
    pub async fn children_of(&self, id: Uuid) -> AppResult<Vec<Division>> {
        sqlx::query_as::<_, Division>(
            "SELECT * FROM divisions WHERE parent_id = $1 ORDER BY name",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list child divisions", e)
        })
    }

    /// Create a new division.
    pub async fn create(&self, data: &CreateDivision) -> AppResult<Division> {
        sqlx::query_as::<_, Division>(
            "INSERT INTO divisions (name, parent_id, description) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("divisions_parent_id_fkey") =>
            {
                AppError::not_found("Parent division not found".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create division", e),
        })
    }

    /// Update a division's fields.
    ///
    /// Callers must reject cycle-creating parent changes before calling this.
    pub async fn update(&self, id: Uuid, data: &UpdateDivision) -> AppResult<Division> {
        // The outer Option on parent_id distinguishes "keep" from "set".
        let (set_parent, new_parent) = match data.parent_id {
            Some(parent) => (true, parent),
            None => (false, None),
        };

        sqlx::query_as::<_, Division>(
            "UPDATE divisions SET name = COALESCE($2, name), \
                                  description = COALESCE($3, description), \
                                  parent_id = CASE WHEN $4 THEN $5 ELSE parent_id END, \
                                  modified_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(set_parent)
        .bind(new_parent)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("divisions_parent_id_fkey") =>
            {
                AppError::not_found("Parent division not found".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update division", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Division {id} not found")))
    }

    /// Delete a division. Returns `true` when a row was removed.
    ///
    /// Children are detached into roots and owned teams become external,
    /// per the schema's `ON DELETE SET NULL` rules.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM divisions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete division", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Add a person to a division with the given role.
    pub async fn add_member(
        &self,
        division_id: Uuid,
        person_id: Uuid,
        role: DivisionRole,
    ) -> AppResult<DivisionMembership> {
        sqlx::query_as::<_, DivisionMembership>(
            "INSERT INTO division_members (division_id, person_id, role) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(division_id)
        .bind(person_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("uq_division_member") =>
            {
                AppError::conflict("Person is already a member of this division".to_string())
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("division_members_division_id_fkey") =>
            {
                AppError::not_found(format!("Division {division_id} not found"))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("division_members_person_id_fkey") =>
            {
                AppError::not_found(format!("Person {person_id} not found"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to add division member", e),
        })
    }

    /// Change a member's role within a division.
    pub async fn update_member_role(
        &self,
        division_id: Uuid,
        person_id: Uuid,
        role: DivisionRole,
    ) -> AppResult<DivisionMembership> {
        sqlx::query_as::<_, DivisionMembership>(
            "UPDATE division_members SET role = $3 \
             WHERE division_id = $1 AND person_id = $2 RETURNING *",
        )
        .bind(division_id)
        .bind(person_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update member role", e)
        })?
        .ok_or_else(|| AppError::not_found("Division membership not found".to_string()))
    }

    /// Remove a person from a division. Returns `true` when a row was removed.
    pub async fn remove_member(&self, division_id: Uuid, person_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM division_members WHERE division_id = $1 AND person_id = $2")
                .bind(division_id)
                .bind(person_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to remove member", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// List a division's memberships.
    pub async fn members(&self, division_id: Uuid) -> AppResult<Vec<DivisionMembership>> {
        sqlx::query_as::<_, DivisionMembership>(
            "SELECT * FROM division_members WHERE division_id = $1 ORDER BY created_at",
        )
        .bind(division_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }

    /// List every division membership a person holds.
    pub async fn memberships_of_person(
        &self,
        person_id: Uuid,
    ) -> AppResult<Vec<DivisionMembership>> {
        sqlx::query_as::<_, DivisionMembership>(
            "SELECT * FROM division_members WHERE person_id = $1",
        )
        .bind(person_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list person memberships", e)
        })
    }

    /// Return a person's role in a division, if they are a member.
    pub async fn member_role(
        &self,
        division_id: Uuid,
        person_id: Uuid,
    ) -> AppResult<Option<DivisionRole>> {
        sqlx::query_scalar(
            "SELECT role FROM division_members WHERE division_id = $1 AND person_id = $2",
        )
        .bind(division_id)
        .bind(person_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up member role", e))
    }
}
