//! Route definitions for the ClubHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to every handler via Axum's `State`
//! extractor.

use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, patch, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(person_routes())
        .merge(division_routes())
        .merge(team_routes())
        .route("/health", get(handlers::health::health));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: login, refresh, logout, registration, profile.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/logout-all", post(handlers::auth::logout_all))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/password", put(handlers::auth::change_password))
}

/// Person directory and account promotion.
fn person_routes() -> Router<AppState> {
    Router::new()
        .route("/persons", get(handlers::persons::list))
        .route("/persons", post(handlers::persons::create))
        .route("/persons/{id}", get(handlers::persons::get))
        .route("/persons/{id}", patch(handlers::persons::update))
        .route("/persons/{id}", delete(handlers::persons::delete))
        .route("/persons/{id}/promote", post(handlers::persons::promote))
        .route("/persons/{id}/roles", post(handlers::persons::assign_role))
        .route(
            "/persons/{id}/roles",
            delete(handlers::persons::remove_role),
        )
}

/// Division tree and memberships.
fn division_routes() -> Router<AppState> {
    Router::new()
        .route("/divisions", get(handlers::divisions::list))
        .route("/divisions", post(handlers::divisions::create))
        .route("/divisions/tree", get(handlers::divisions::tree))
        .route("/divisions/{id}", get(handlers::divisions::get))
        .route("/divisions/{id}", patch(handlers::divisions::update))
        .route("/divisions/{id}", delete(handlers::divisions::delete))
        .route(
            "/divisions/{id}/children",
            get(handlers::divisions::children),
        )
        .route("/divisions/{id}/teams", get(handlers::divisions::teams))
        .route("/divisions/{id}/members", get(handlers::divisions::members))
        .route(
            "/divisions/{id}/members",
            post(handlers::divisions::add_member),
        )
        .route(
            "/divisions/{id}/members/{person_id}",
            put(handlers::divisions::update_member),
        )
        .route(
            "/divisions/{id}/members/{person_id}",
            delete(handlers::divisions::remove_member),
        )
}

/// Teams, promotion and memberships.
fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(handlers::teams::list))
        .route("/teams", post(handlers::teams::create))
        .route("/teams/proxy", post(handlers::teams::create_proxy))
        .route("/teams/{id}", get(handlers::teams::get))
        .route("/teams/{id}", patch(handlers::teams::update))
        .route("/teams/{id}", delete(handlers::teams::delete))
        .route("/teams/{id}/promote", post(handlers::teams::promote))
        .route("/teams/{id}/members", get(handlers::teams::members))
        .route("/teams/{id}/members", post(handlers::teams::add_member))
        .route(
            "/teams/{id}/members/{person_id}",
            put(handlers::teams::update_member),
        )
        .route(
            "/teams/{id}/members/{person_id}",
            delete(handlers::teams::remove_member),
        )
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let cors_config = &state.config.server.cors;
    if !cors_config.enabled {
        return CorsLayer::new();
    }

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
