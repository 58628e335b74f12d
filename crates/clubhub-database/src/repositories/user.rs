//! User account repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_entity::person::CreatePerson;
use clubhub_entity::user::User;

/// Repository for user account operations.
///
/// Users share their primary key with a person row, so account creation is
/// transactional across both tables.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Create a person and a login account for them in one transaction.
    ///
    /// The new user row takes the freshly created person's id as its own.
    pub async fn create_with_person(
        &self,
        person: &CreatePerson,
        username: &str,
        password_hash: &str,
    ) -> AppResult<User> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let person_id: Uuid = sqlx::query_scalar(
            "INSERT INTO persons (firstname, lastname, email, mobile) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&person.firstname)
        .bind(&person.lastname)
        .bind(&person.email)
        .bind(&person.mobile)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("persons_email_key") =>
            {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create person", e),
        })?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, password_hash) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(person_id)
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict(format!("Username '{username}' already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(user)
    }

    /// Attach a login account to an existing person.
    ///
    /// Returns `None` when the person does not exist or already has an
    /// account.
    pub async fn create_for_person(
        &self,
        person_id: Uuid,
        username: &str,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, password_hash) \
             SELECT $1, $2, $3 \
             WHERE EXISTS (SELECT 1 FROM persons WHERE id = $1) \
               AND NOT EXISTS (SELECT 1 FROM users WHERE id = $1) \
             RETURNING *",
        )
        .bind(person_id)
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict(format!("Username '{username}' already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user for person", e),
        })?;

        Ok(user)
    }

    /// Stamp the last successful login time.
    pub async fn record_login(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to record login", e)
            })?;
        Ok(())
    }

    /// Update a user's password hash.
    pub async fn update_password(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update password", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }
}
