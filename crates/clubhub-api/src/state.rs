//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use clubhub_auth::account::AccountService;
use clubhub_auth::hierarchy::HierarchyResolver;
use clubhub_auth::jwt::JwtDecoder;
use clubhub_auth::permission::PermissionEngine;
use clubhub_auth::token::TokenService;
use clubhub_cache::CacheManager;
use clubhub_core::config::AppConfig;
use clubhub_database::repositories::{
    DivisionRepository, PersonRepository, RefreshTokenRepository, RoleRepository, TeamRepository,
    UserRepository,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All services are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Cache manager (Redis or in-memory).
    pub cache: CacheManager,

    /// JWT access token validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Login and account provisioning.
    pub accounts: Arc<AccountService>,
    /// Refresh token lifecycle.
    pub tokens: Arc<TokenService>,
    /// Permission predicates.
    pub permissions: Arc<PermissionEngine>,
    /// Division ancestor resolution.
    pub hierarchy: Arc<HierarchyResolver>,

    /// Person repository.
    pub person_repo: Arc<PersonRepository>,
    /// User repository.
    pub user_repo: Arc<UserRepository>,
    /// Division repository.
    pub division_repo: Arc<DivisionRepository>,
    /// Team repository.
    pub team_repo: Arc<TeamRepository>,
    /// Global role repository.
    pub role_repo: Arc<RoleRepository>,
}

impl AppState {
    /// Wire up the full dependency graph from infrastructure handles.
    pub fn build(config: Arc<AppConfig>, db_pool: PgPool, cache: CacheManager) -> Self {
        let person_repo = PersonRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());
        let division_repo = DivisionRepository::new(db_pool.clone());
        let team_repo = TeamRepository::new(db_pool.clone());
        let role_repo = RoleRepository::new(db_pool.clone());
        let token_repo = RefreshTokenRepository::new(db_pool.clone());

        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let accounts = Arc::new(AccountService::new(user_repo.clone()));
        let tokens = Arc::new(TokenService::new(
            token_repo,
            user_repo.clone(),
            cache.clone(),
            &config.auth,
        ));
        let permissions = Arc::new(PermissionEngine::new(
            role_repo.clone(),
            division_repo.clone(),
            team_repo.clone(),
        ));
        let hierarchy = Arc::new(HierarchyResolver::new(division_repo.clone()));

        Self {
            config,
            db_pool,
            cache,
            jwt_decoder,
            accounts,
            tokens,
            permissions,
            hierarchy,
            person_repo: Arc::new(person_repo),
            user_repo: Arc::new(user_repo),
            division_repo: Arc::new(division_repo),
            team_repo: Arc::new(team_repo),
            role_repo: Arc::new(role_repo),
        }
    }
}
