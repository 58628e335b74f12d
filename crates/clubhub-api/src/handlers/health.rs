//! Health check handler.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use clubhub_core::error::AppError;
use clubhub_core::traits::CacheProvider;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub cache: String,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
    {
        Ok(_) => "up",
        Err(_) => "down",
    };

    let cache = match state.cache.health_check().await {
        Ok(()) => "up",
        Err(_) => "down",
    };

    let status = if database == "up" && cache == "up" {
        "healthy"
    } else {
        "degraded"
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        cache: cache.to_string(),
    }))
}
