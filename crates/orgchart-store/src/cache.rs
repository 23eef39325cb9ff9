//! TTL cache over moka
//!
//! One explicit cache instance is injected into the tree assembler (no
//! ambient module-level state). Entries carry their own TTL, and a write
//! to any underlying store invalidates by key prefix.

use moka::sync::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};

/// Default time-to-live for cached reads
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct PerEntryTtl;

impl<K, V> Expiry<K, (V, Duration)> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &K,
        value: &(V, Duration),
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.1)
    }
}

/// String-keyed cache with per-entry TTL and prefix invalidation
#[derive(Clone)]
pub struct KeyValueCache<V: Clone + Send + Sync + 'static> {
    inner: Cache<String, (V, Duration)>,
}

impl<V: Clone + Send + Sync + 'static> KeyValueCache<V> {
    /// Cache bounded to `max_capacity` entries
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(PerEntryTtl)
                .support_invalidation_closures()
                .build(),
        }
    }

    /// Cached value for a key, when present and unexpired
    #[must_use]
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key).map(|(value, _ttl)| value)
    }

    /// Store a value under a key for `ttl`
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.inner.insert(key.into(), (value, ttl));
    }

    /// Drop one key
    pub fn invalidate(&self, key: &str) {
        self.inner.invalidate(key);
    }

    /// Drop every key starting with `prefix`
    pub fn invalidate_prefix(&self, prefix: &str) {
        let prefix = prefix.to_string();
        if let Err(e) = self
            .inner
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
        {
            tracing::warn!("cache prefix invalidation failed: {e}");
        }
    }

    /// Approximate entry count
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl<V: Clone + Send + Sync + 'static> Default for KeyValueCache<V> {
    /// Cache with a 1,024-entry capacity
    fn default() -> Self {
        Self::new(1_024)
    }
}

impl<V: Clone + Send + Sync + 'static> std::fmt::Debug for KeyValueCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueCache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let cache: KeyValueCache<String> = KeyValueCache::default();
        cache.set("orgtree:nodes", "payload".to_string(), DEFAULT_TTL);
        assert_eq!(cache.get("orgtree:nodes").as_deref(), Some("payload"));
        assert_eq!(cache.get("orgtree:other"), None);
    }

    #[test]
    fn invalidate_single_key() {
        let cache: KeyValueCache<u32> = KeyValueCache::default();
        cache.set("a", 1, DEFAULT_TTL);
        cache.invalidate("a");
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn invalidate_by_prefix() {
        let cache: KeyValueCache<u32> = KeyValueCache::default();
        cache.set("orgtree:nodes", 1, DEFAULT_TTL);
        cache.set("orgtree:summary", 2, DEFAULT_TTL);
        cache.set("other:key", 3, DEFAULT_TTL);

        cache.invalidate_prefix("orgtree:");
        assert_eq!(cache.get("orgtree:nodes"), None);
        assert_eq!(cache.get("orgtree:summary"), None);
        assert_eq!(cache.get("other:key"), Some(3));
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let cache: KeyValueCache<u32> = KeyValueCache::default();
        cache.set("ephemeral", 9, Duration::ZERO);
        assert_eq!(cache.get("ephemeral"), None);
    }
}
