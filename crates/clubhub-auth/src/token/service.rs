//! Refresh token lifecycle service.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use clubhub_cache::{CacheManager, keys};
use clubhub_core::config::auth::AuthConfig;
use clubhub_core::result::AppResult;
use clubhub_core::traits::CacheProvider;
use clubhub_database::repositories::{RefreshTokenRepository, UserRepository};
use clubhub_entity::user::User;

use super::generator::{generate_opaque_token, hash_token};
use crate::jwt::JwtEncoder;

/// An access + refresh token pair handed to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived JWT access token.
    pub access_token: String,
    /// Opaque refresh token. Leaves the server exactly once.
    pub refresh_token: String,
    /// Access token expiry.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Manages the refresh token lifecycle across the durable store and cache.
///
/// The Postgres rows are the source of truth; the cache is a fast lookup
/// layer only. Writes always land durably before the cache is touched, and
/// cache failures degrade to warnings rather than failing the operation.
#[derive(Clone)]
pub struct TokenService {
    tokens: RefreshTokenRepository,
    users: UserRepository,
    cache: CacheManager,
    encoder: JwtEncoder,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Create a new token service.
    pub fn new(
        tokens: RefreshTokenRepository,
        users: UserRepository,
        cache: CacheManager,
        config: &AuthConfig,
    ) -> Self {
        Self {
            tokens,
            users,
            cache,
            encoder: JwtEncoder::new(config),
            refresh_ttl: Duration::days(config.refresh_ttl_days),
        }
    }

    /// Issue a fresh token pair for an authenticated user.
    pub async fn issue(&self, user: &User, device_info: Option<&str>) -> AppResult<TokenPair> {
        let raw = generate_opaque_token();
        let hash = hash_token(&raw);
        let expires_at = Utc::now() + self.refresh_ttl;

        // Durable record first; the cache entry is only a lookup shortcut.
        self.tokens
            .insert(user.id, &hash, device_info, expires_at)
            .await?;
        self.cache_token(user.id, &hash).await;

        let (access_token, access_expires_at) =
            self.encoder.encode_access_token(user.id, &user.username)?;

        Ok(TokenPair {
            access_token,
            refresh_token: raw,
            access_expires_at,
            refresh_expires_at: expires_at,
        })
    }

    /// Redeem a refresh token, rotating it and minting a new access token.
    ///
    /// Every failure mode answers `None`: unknown token, expired, revoked,
    /// inactive user, or losing a concurrent rotation race. The presented
    /// token is dead either way.
    pub async fn refresh(&self, raw_token: &str) -> AppResult<Option<TokenPair>> {
        let hash = hash_token(raw_token);

        match self.cache.get(&keys::refresh_token(&hash)).await {
            Ok(Some(_)) => debug!("Refresh token cache hit"),
            Ok(None) => debug!("Refresh token cache miss, falling back to durable store"),
            Err(e) => warn!(error = %e, "Cache lookup failed, falling back to durable store"),
        }

        // The durable record decides, regardless of what the cache said.
        let Some(record) = self.tokens.find_by_hash(&hash).await? else {
            self.evict_token(None, &hash).await;
            return Ok(None);
        };

        if !record.is_valid() {
            self.evict_token(Some(record.user_id), &hash).await;
            return Ok(None);
        }

        let user = match self.users.find_by_id(record.user_id).await? {
            Some(user) if user.is_active => user,
            _ => {
                self.tokens.revoke(&hash).await?;
                self.evict_token(Some(record.user_id), &hash).await;
                return Ok(None);
            }
        };

        let new_raw = generate_opaque_token();
        let new_hash = hash_token(&new_raw);
        let new_expires_at = Utc::now() + self.refresh_ttl;

        // Optimistic rotation: exactly one concurrent caller wins.
        let Some(rotated) = self
            .tokens
            .rotate(&hash, user.id, &new_hash, new_expires_at)
            .await?
        else {
            self.evict_token(Some(record.user_id), &hash).await;
            return Ok(None);
        };

        self.evict_token(Some(user.id), &hash).await;
        self.cache_token(user.id, &new_hash).await;

        let (access_token, access_expires_at) =
            self.encoder.encode_access_token(user.id, &user.username)?;

        Ok(Some(TokenPair {
            access_token,
            refresh_token: new_raw,
            access_expires_at,
            refresh_expires_at: rotated.expires_at,
        }))
    }

    /// Revoke a single refresh token.
    ///
    /// Returns `true` whenever a matching record exists, even one already
    /// revoked or expired, so revocation is idempotent. Only an unknown token
    /// reports `false`. Stale cache entries are cleared either way.
    pub async fn revoke(&self, raw_token: &str) -> AppResult<bool> {
        let hash = hash_token(raw_token);

        let record = self.tokens.find_by_hash(&hash).await?;
        match record {
            Some(ref r) => {
                // Guarded on revoked_at inside the repo; a no-op update on an
                // already-revoked row still counts as success here.
                self.tokens.revoke(&hash).await?;
                self.evict_token(Some(r.user_id), &hash).await;
                Ok(true)
            }
            None => {
                self.evict_token(None, &hash).await;
                Ok(false)
            }
        }
    }

    /// Revoke every live refresh token a user holds.
    ///
    /// Returns the number of tokens revoked.
    pub async fn revoke_all(&self, user_id: Uuid) -> AppResult<u64> {
        let hashes = self.tokens.revoke_all(user_id).await?;

        for hash in &hashes {
            if let Err(e) = self.cache.delete(&keys::refresh_token(hash)).await {
                warn!(error = %e, "Failed to evict refresh token from cache");
            }
        }
        if let Err(e) = self.cache.delete(&keys::user_sessions(user_id)).await {
            warn!(error = %e, "Failed to clear user session index");
        }

        Ok(hashes.len() as u64)
    }

    /// Write the cache entries for a freshly stored token hash.
    async fn cache_token(&self, user_id: Uuid, hash: &str) {
        let ttl = StdDuration::from_secs(self.refresh_ttl.num_seconds().max(0) as u64);
        if let Err(e) = self
            .cache
            .set(&keys::refresh_token(hash), &user_id.to_string(), ttl)
            .await
        {
            warn!(error = %e, "Failed to cache refresh token");
            return;
        }
        if let Err(e) = self
            .cache
            .set_add(&keys::user_sessions(user_id), hash)
            .await
        {
            warn!(error = %e, "Failed to index user session");
        }
    }

    /// Drop the cache entries for a dead token hash.
    async fn evict_token(&self, user_id: Option<Uuid>, hash: &str) {
        if let Err(e) = self.cache.delete(&keys::refresh_token(hash)).await {
            warn!(error = %e, "Failed to evict refresh token from cache");
        }
        if let Some(user_id) = user_id {
            if let Err(e) = self
                .cache
                .set_remove(&keys::user_sessions(user_id), hash)
                .await
            {
                warn!(error = %e, "Failed to unindex user session");
            }
        }
    }
}
