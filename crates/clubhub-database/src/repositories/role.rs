//! Global role repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_entity::user::Role;

/// Repository for organization-wide role assignments.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a role by name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find role by name", e)
            })
    }

    /// Check whether a user holds the named global role.
    pub async fn user_has_role(&self, user_id: Uuid, role_name: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_roles ur \
             JOIN roles r ON r.id = ur.role_id \
             WHERE ur.user_id = $1 AND r.name = $2",
        )
        .bind(user_id)
        .bind(role_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check user role", e))?;

        Ok(count > 0)
    }

    /// Return the names of all global roles a user holds.
    pub async fn roles_of(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar(
            "SELECT r.name FROM user_roles ur \
             JOIN roles r ON r.id = ur.role_id \
             WHERE ur.user_id = $1 ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user roles", e))
    }

    /// Grant a global role to a user.
    ///
    /// Granting a role the user already holds is a no-op.
    pub async fn assign(&self, user_id: Uuid, role_name: &str) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) \
             SELECT $1, id FROM roles WHERE name = $2 \
             ON CONFLICT ON CONSTRAINT uq_user_role DO NOTHING",
        )
        .bind(user_id)
        .bind(role_name)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("user_roles_user_id_fkey") =>
            {
                AppError::not_found(format!("User {user_id} not found"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to assign role", e),
        })?;

        // The INSERT..SELECT matches zero rows when the role name is unknown.
        if result.rows_affected() == 0 {
            let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles WHERE name = $1")
                .bind(role_name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to look up role", e)
                })?;
            if exists == 0 {
                return Err(AppError::not_found(format!("Role '{role_name}' not found")));
            }
        }
        Ok(())
    }

    /// Remove a global role from a user. Returns `true` when a row was removed.
    pub async fn remove(&self, user_id: Uuid, role_name: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM user_roles ur \
             USING roles r \
             WHERE ur.role_id = r.id AND ur.user_id = $1 AND r.name = $2",
        )
        .bind(user_id)
        .bind(role_name)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove role", e))?;

        Ok(result.rows_affected() > 0)
    }
}
