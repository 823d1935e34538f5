//! Shared cache of computed batches.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use moka::policy::EvictionPolicy;

use crate::cache::key::BatchKey;
use crate::config::CacheConfig;
use crate::model::RouteResult;
use crate::observability::metrics;

/// Sorted results of one batch, shared read-only between cache and callers.
pub type CachedBatch = Arc<[RouteResult]>;

/// Bounded LRU cache of batches, each entry expiring `ttl` after insertion.
///
/// Every write runs pending maintenance, so the entry count never stays above
/// `capacity` and the victim is always the least recently read or written key.
/// Expired entries read as misses.
#[derive(Clone)]
pub struct ResultCache {
    inner: Cache<BatchKey, CachedBatch>,
}

impl ResultCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity as u64)
            .time_to_live(ttl)
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self { inner }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity, Duration::from_secs(config.ttl_secs))
    }

    /// A hit becomes the most recently used entry.
    pub async fn get(&self, key: &BatchKey) -> Option<CachedBatch> {
        let hit = self.inner.get(key).await;
        metrics::record_cache_lookup(hit.is_some());
        hit
    }

    /// Insert or replace; at capacity the least recently used entry goes.
    pub async fn set(&self, key: BatchKey, batch: CachedBatch) {
        self.inner.insert(key, batch).await;
        self.inner.run_pending_tasks().await;
        metrics::record_cache_size(self.len());
    }

    /// Presence check without touching recency.
    pub fn contains(&self, key: &BatchKey) -> bool {
        self.inner.contains_key(key)
    }

    /// Entries as of the last maintenance pass.
    pub fn len(&self) -> usize {
        self.inner.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache").field("entries", &self.len()).finish()
    }
}
