//! In-process cache provider backed by dashmap.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use clubhub_core::config::cache::MemoryCacheConfig;
use clubhub_core::result::AppResult;
use clubhub_core::traits::cache::CacheProvider;

/// In-memory cache provider for development and tests.
///
/// Expiry is lazy: a stale entry is dropped when it is next read, and a
/// purge sweep runs when the store grows past its configured capacity.
/// Sets never expire; callers remove members explicitly.
#[derive(Debug)]
pub struct MemoryCacheProvider {
    entries: DashMap<String, (String, Option<Instant>)>,
    sets: DashMap<String, HashSet<String>>,
    default_ttl: Duration,
    max_capacity: u64,
}

impl MemoryCacheProvider {
    /// Create a new in-memory provider.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        Self {
            entries: DashMap::new(),
            sets: DashMap::new(),
            default_ttl: Duration::from_secs(default_ttl_seconds),
            max_capacity: config.max_capacity,
        }
    }

    fn is_expired(deadline: &Option<Instant>) -> bool {
        deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Drop every expired entry.
    fn purge_expired(&self) {
        self.entries.retain(|_, (_, deadline)| !Self::is_expired(deadline));
    }

    fn insert(&self, key: &str, value: &str, ttl: Duration) {
        if self.entries.len() as u64 >= self.max_capacity {
            self.purge_expired();
        }
        self.entries
            .insert(key.to_string(), (value.to_string(), Some(Instant::now() + ttl)));
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if let Some(entry) = self.entries.get(key) {
            let (value, deadline) = entry.value();
            if Self::is_expired(deadline) {
                drop(entry);
                self.entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(value.clone()));
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.insert(key, value, ttl);
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.insert(key, value, self.default_ttl);
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        if self.get(key).await?.is_some() {
            return Ok(false);
        }
        self.insert(key, value, ttl);
        Ok(true)
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        if let Some(mut entry) = self.entries.get_mut(key) {
            if Self::is_expired(&entry.value().1) {
                drop(entry);
                self.entries.remove(key);
                return Ok(false);
            }
            entry.value_mut().1 = Some(Instant::now() + ttl);
            return Ok(true);
        }
        Ok(false)
    }

    async fn set_add(&self, key: &str, member: &str) -> AppResult<()> {
        self.sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn set_remove(&self, key: &str, member: &str) -> AppResult<bool> {
        let removed = self
            .sets
            .get_mut(key)
            .map(|mut set| set.remove(member))
            .unwrap_or(false);
        // Drop the set entry once it empties out.
        if removed {
            self.sets.remove_if(key, |_, set| set.is_empty());
        }
        Ok(removed)
    }

    async fn set_members(&self, key: &str) -> AppResult<Vec<String>> {
        Ok(self
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.entries.clear();
        self.sets.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig::default(), 60)
    }

    #[tokio::test]
    async fn set_and_get() {
        let cache = provider();
        cache.set("k", "v", Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn expired_entry_is_gone() {
        let cache = provider();
        cache.set("k", "v", Duration::ZERO).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(!cache.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn set_nx_respects_existing_key() {
        let cache = provider();
        assert!(cache.set_nx("k", "a", Duration::from_secs(60)).await.unwrap());
        assert!(!cache.set_nx("k", "b", Duration::from_secs(60)).await.unwrap());
        assert_eq!(cache.get("k").await.unwrap(), Some("a".to_string()));
    }

    #[tokio::test]
    async fn delete_reports_whether_key_existed() {
        let cache = provider();
        cache.set_default("k", "v").await.unwrap();
        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn set_operations() {
        let cache = provider();
        cache.set_add("s", "a").await.unwrap();
        cache.set_add("s", "b").await.unwrap();
        cache.set_add("s", "a").await.unwrap();

        let mut members = cache.set_members("s").await.unwrap();
        members.sort();
        assert_eq!(members, vec!["a".to_string(), "b".to_string()]);

        assert!(cache.set_remove("s", "a").await.unwrap());
        assert!(!cache.set_remove("s", "a").await.unwrap());
        assert_eq!(cache.set_members("s").await.unwrap(), vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn flush_clears_everything() {
        let cache = provider();
        cache.set_default("k", "v").await.unwrap();
        cache.set_add("s", "m").await.unwrap();
        cache.flush_all().await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.set_members("s").await.unwrap().is_empty());
    }
}
