//! Shared Cache Module
//!
//! The put/get capability the user repository is handed, plus its
//! implementation over a lock-guarded [`CacheStore`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore, Clock};
use crate::error::{AppError, Result};

/// Key-value cache with per-key expiry.
///
/// Only `put` and `get` exist. Callers cannot evict a key early.
#[async_trait]
pub trait NameCache: Send + Sync {
    /// Stores `value` under `key` for `ttl`.
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Returns the live value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;
}

// == Shared Cache ==
/// Cloneable handle to a [`CacheStore`] guarded by an async `RwLock`.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl SharedCache {
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Shared cache driven by `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(CacheStore::with_clock(clock))
    }

    /// The underlying lock, for the background sweeper.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.inner.clone()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}

impl Default for SharedCache {
    fn default() -> Self {
        Self::new(CacheStore::new())
    }
}

#[async_trait]
impl NameCache for SharedCache {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut store = self.inner.write().await;
        store.set(key.to_string(), value.to_string(), ttl.as_secs())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Write lock: lookups update stats and drop expired entries
        let mut store = self.inner.write().await;
        match store.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(AppError::NotFound(_)) | Err(AppError::Expired(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = SharedCache::default();

        cache
            .put("user:1:name", "test", Duration::from_secs(600))
            .await
            .unwrap();

        assert_eq!(
            cache.get("user:1:name").await.unwrap(),
            Some("test".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let cache = SharedCache::default();
        assert_eq!(cache.get("user:1:name").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_is_none() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = SharedCache::with_clock(clock.clone());

        cache
            .put("user:1:name", "test", Duration::from_secs(600))
            .await
            .unwrap();
        clock.advance(Duration::from_secs(601));

        assert_eq!(cache.get("user:1:name").await.unwrap(), None);
        assert_eq!(cache.stats().await.expirations, 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let cache = SharedCache::default();
        let other = cache.clone();

        cache.put("k", "v", Duration::from_secs(60)).await.unwrap();

        assert_eq!(other.get("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(other.store().read().await.len(), 1);
    }
}
