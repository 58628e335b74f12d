use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Abstraction over a key-value cache backend.
///
/// Implementations exist for Redis and for an in-process store. Values are
/// stored as strings; callers are responsible for serialization. Set
/// operations back the per-user session index.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Get a value by key. Returns `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with an explicit TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Set a value using the provider's default TTL.
    async fn set_default(&self, key: &str, value: &str) -> AppResult<()>;

    /// Set a value only if the key does not already exist.
    ///
    /// Returns `true` when the value was written.
    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// Delete a key. Returns `true` when a key was removed.
    async fn delete(&self, key: &str) -> AppResult<bool>;

    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Set a fresh TTL on an existing key. Returns `true` when the key exists.
    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool>;

    /// Add a member to the set stored at `key`.
    async fn set_add(&self, key: &str, member: &str) -> AppResult<()>;

    /// Remove a member from the set stored at `key`.
    async fn set_remove(&self, key: &str, member: &str) -> AppResult<bool>;

    /// Return all members of the set stored at `key`.
    async fn set_members(&self, key: &str) -> AppResult<Vec<String>>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> AppResult<()>;

    /// Remove every key. Intended for tests and administrative tooling.
    async fn flush_all(&self) -> AppResult<()>;
}
