//! Shared test helpers for integration tests.
//!
//! The suite runs against a real PostgreSQL instance. Point
//! `CLUBHUB_TEST_DATABASE_URL` at one to enable it; when the variable is
//! unset every test returns early so the suite can run anywhere.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use clubhub_core::config::{AppConfig, DatabaseConfig};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
}

impl TestApp {
    /// Boot the full router against the test database.
    pub async fn try_new() -> Option<Self> {
        let Ok(url) = std::env::var("CLUBHUB_TEST_DATABASE_URL") else {
            eprintln!("CLUBHUB_TEST_DATABASE_URL not set, skipping");
            return None;
        };

        let config = AppConfig {
            server: Default::default(),
            database: DatabaseConfig {
                url,
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 60,
            },
            cache: Default::default(),
            auth: Default::default(),
            logging: Default::default(),
        };

        let db = clubhub_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        clubhub_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let cache = clubhub_cache::CacheManager::new(&config.cache)
            .await
            .expect("Failed to init cache");

        let db_pool = db.into_pool();
        let state = clubhub_api::AppState::build(Arc::new(config), db_pool.clone(), cache);
        let router = clubhub_api::build_router(state);

        Some(Self { router, db_pool })
    }

    /// Insert a person row and return its id.
    pub async fn create_person(&self, firstname: &str, lastname: &str) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO persons (firstname, lastname) VALUES ($1, $2) RETURNING id",
        )
        .bind(firstname)
        .bind(lastname)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test person")
    }

    /// Insert a person with a login account, optionally holding a global role.
    pub async fn create_user(&self, username: &str, password: &str, role: Option<&str>) -> Uuid {
        let id = self.create_person(username, "Tester").await;
        let hash = clubhub_auth::PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");

        sqlx::query("INSERT INTO users (id, username, password_hash) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(username)
            .bind(&hash)
            .execute(&self.db_pool)
            .await
            .expect("Failed to create test user");

        if let Some(role) = role {
            sqlx::query(
                "INSERT INTO user_roles (user_id, role_id) \
                 SELECT $1, id FROM roles WHERE name = $2",
            )
            .bind(id)
            .bind(role)
            .execute(&self.db_pool)
            .await
            .expect("Failed to assign test role");
        }

        id
    }

    /// Insert a division row and return its id.
    pub async fn create_division(&self, name: &str, parent_id: Option<Uuid>) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO divisions (name, parent_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(parent_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test division")
    }

    /// Attach a person to a division with the given role.
    pub async fn add_division_member(&self, division_id: Uuid, person_id: Uuid, role: &str) {
        sqlx::query(
            "INSERT INTO division_members (division_id, person_id, role) \
             VALUES ($1, $2, $3::division_role)",
        )
        .bind(division_id)
        .bind(person_id)
        .bind(role)
        .execute(&self.db_pool)
        .await
        .expect("Failed to add division member");
    }

    /// Insert a team row and return its id.
    pub async fn create_team(&self, name: &str, division_id: Option<Uuid>) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO teams (name, division_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(division_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create test team")
    }

    /// Login and return the access and refresh tokens.
    pub async fn login(&self, username: &str, password: &str) -> (String, String) {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        let data = &response.body["data"];
        (
            data["access_token"]
                .as_str()
                .expect("No access_token in login response")
                .to_string(),
            data["refresh_token"]
                .as_str()
                .expect("No refresh_token in login response")
                .to_string(),
        )
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// A name no other test run will collide with.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
