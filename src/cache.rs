//! Verification cache.
//!
//! Maps a namespaced source-IP key to the domain suffix it was verified
//! against. The verifier only reads and writes through [`VerificationCache`],
//! so the backing store can be swapped for a shared one.

use crate::config::CacheConfig;
use crate::error::CacheError;
use async_trait::async_trait;
use moka::future::Cache;

/// Narrow get/set interface to the shared verification cache.
#[async_trait]
pub trait VerificationCache: Send + Sync {
    /// Fetch the domain previously verified for `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Record the domain verified for `key`. Writing the same pair twice is harmless.
    async fn set(&self, key: &str, domain: &str) -> Result<(), CacheError>;
}

/// In-process verification cache backed by moka.
pub struct MokaVerificationCache {
    inner: Cache<String, String>,
    name: String,
}

impl MokaVerificationCache {
    /// Create a cache. Entries expire only if a TTL is given.
    pub fn new(name: impl Into<String>, max_capacity: u64, ttl: Option<std::time::Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(max_capacity);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            inner: builder.build(),
            name: name.into(),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new("bot_verification", config.max_capacity, config.ttl())
    }

    /// Get the current entry count.
    ///
    /// Moka updates this lazily; call [`run_pending_tasks`](Self::run_pending_tasks) first
    /// for an exact figure.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }

    /// Get the cache name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invalidate all entries.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[async_trait]
impl VerificationCache for MokaVerificationCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.inner.get(key).await)
    }

    async fn set(&self, key: &str, domain: &str) -> Result<(), CacheError> {
        self.inner.insert(key.to_string(), domain.to_string()).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cache_basic() {
        let cache = MokaVerificationCache::new("test", 100, None);

        cache.set("VALID_BOT_66.249.66.1", "googlebot.com").await.unwrap();

        let value = cache.get("VALID_BOT_66.249.66.1").await.unwrap();
        assert_eq!(value.as_deref(), Some("googlebot.com"));

        let missing = cache.get("VALID_BOT_1.2.3.4").await.unwrap();
        assert_eq!(missing, None);

        cache.run_pending_tasks().await;
        assert_eq!(cache.entry_count(), 1);
        assert_eq!(cache.name(), "test");
    }

    #[tokio::test]
    async fn test_cache_expiry() {
        let cache = MokaVerificationCache::new("test", 100, Some(Duration::from_millis(50)));

        cache.set("key", "google.com").await.unwrap();

        // Should exist immediately
        assert!(cache.get("key").await.unwrap().is_some());

        // Wait for expiry
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Should be gone
        assert!(cache.get("key").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cache_invalidate_all() {
        let cache = MokaVerificationCache::from_config(&CacheConfig::default());
        cache.set("key", "superbot.com").await.unwrap();

        cache.invalidate_all();

        assert!(cache.get("key").await.unwrap().is_none());
    }
}
