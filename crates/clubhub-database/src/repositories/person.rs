//! Person repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_core::types::pagination::{Page, Paginated};
use clubhub_entity::person::{CreatePerson, Person, UpdatePerson};

/// Repository for person CRUD and query operations.
#[derive(Debug, Clone)]
pub struct PersonRepository {
    pool: PgPool,
}

impl PersonRepository {
    /// Create a new person repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a person by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Person>> {
        sqlx::query_as::<_, Person>("SELECT * FROM persons WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find person by id", e)
            })
    }

    /// List all persons with pagination.
    pub async fn find_all(&self, page: &Page) -> AppResult<Paginated<Person>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count persons", e)
            })?;

        let persons = sqlx::query_as::<_, Person>(
            "SELECT * FROM persons ORDER BY lastname, firstname LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list persons", e))?;

        Ok(Paginated::new(persons, page, total as u64))
    }

    /// Search persons by name or email.
    pub async fn search(&self, query: &str, page: &Page) -> AppResult<Paginated<Person>> {
        let pattern = format!("%{query}%");

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM persons \
             WHERE firstname ILIKE $1 OR lastname ILIKE $1 OR email ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count search results", e)
        })?;

        let persons = sqlx::query_as::<_, Person>(
            "SELECT * FROM persons \
             WHERE firstname ILIKE $1 OR lastname ILIKE $1 OR email ILIKE $1 \
             ORDER BY lastname, firstname LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search persons", e))?;

        Ok(Paginated::new(persons, page, total as u64))
    }

    /// Create a new person.
    pub async fn create(&self, data: &CreatePerson) -> AppResult<Person> {
        sqlx::query_as::<_, Person>(
            "INSERT INTO persons (firstname, lastname, email, mobile) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(&data.email)
        .bind(&data.mobile)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("persons_email_key") =>
            {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create person", e),
        })
    }

    /// Update a person's profile fields.
    pub async fn update(&self, id: Uuid, data: &UpdatePerson) -> AppResult<Person> {
        sqlx::query_as::<_, Person>(
            "UPDATE persons SET firstname = COALESCE($2, firstname), \
                                lastname = COALESCE($3, lastname), \
                                email = COALESCE($4, email), \
                                mobile = COALESCE($5, mobile), \
                                modified_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(&data.email)
        .bind(&data.mobile)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("persons_email_key") =>
            {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update person", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Person {id} not found")))
    }

    /// Delete a person. Returns `true` when a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete person", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
