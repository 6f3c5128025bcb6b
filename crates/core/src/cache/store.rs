//! The cache map and its public handle.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use super::sweep::Sweeper;

/// Roughly 30 years, used when a deadline would overflow `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// `now + after`, saturating to a far-future instant instead of overflowing.
pub(super) fn deadline_after(now: Instant, after: Duration) -> Instant {
    now.checked_add(after)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

/// A cached value and the instant it stops being served.
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Shared state between the cache handle and its sweep task.
pub(super) struct Store {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Store {
    /// Drop every expired entry, returning how many were removed.
    pub(super) async fn sweep(&self) -> usize {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }
}

/// Diagnostic snapshot of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently held, including expired ones not yet swept.
    pub size: usize,
    /// Configured time-to-live.
    pub ttl_seconds: u64,
}

/// Concurrent key/value cache with per-entry expiry.
///
/// Keys are opaque strings (the URL as the caller supplied it). Must be
/// created inside a Tokio runtime, since it spawns its sweep task.
pub struct TtlCache {
    store: Arc<Store>,
    sweeper: Mutex<Option<Sweeper>>,
}

impl TtlCache {
    /// Create a cache whose entries live for `ttl`, swept every `sweep_interval`.
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        let store = Arc::new(Store { entries: RwLock::new(HashMap::new()), ttl });
        let sweeper = Sweeper::spawn(Arc::clone(&store), sweep_interval);

        Self { store, sweeper: Mutex::new(Some(sweeper)) }
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let entry = CacheEntry { value: value.into(), expires_at: deadline_after(Instant::now(), self.store.ttl) };
        self.store.entries.write().await.insert(key.into(), entry);
    }

    /// Get the value for `key` if present and not yet expired.
    ///
    /// Expired entries are left in place for the sweep.
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.store.entries.read().await;
        let now = Instant::now();

        entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone())
    }

    /// Discard all entries.
    pub async fn clear(&self) {
        self.store.entries.write().await.clear();
    }

    /// Stop the sweep and discard all entries.
    ///
    /// Waits for a sweep in progress to finish. Only the first call stops the
    /// sweep; later calls just clear. Callers must not start new requests once
    /// shutdown has begun.
    pub async fn destroy(&self) {
        let sweeper = self.sweeper.lock().await.take();
        if let Some(sweeper) = sweeper {
            sweeper.shutdown().await;
        }

        self.clear().await;
        tracing::debug!("cache destroyed");
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats { size: self.store.entries.read().await.len(), ttl_seconds: self.store.ttl.as_secs() }
    }

    pub fn ttl(&self) -> Duration {
        self.store.ttl
    }
}

impl Drop for TtlCache {
    fn drop(&mut self) {
        if let Some(sweeper) = self.sweeper.get_mut().take() {
            sweeper.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = TtlCache::new(Duration::from_secs(60), HOUR);
        cache.set("https://example.com", "# Hello").await;

        assert_eq!(cache.get("https://example.com").await.as_deref(), Some("# Hello"));
        assert_eq!(cache.get("https://other.com").await, None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = TtlCache::new(Duration::from_secs(60), HOUR);
        cache.set("k", "old").await;
        cache.set("k", "new").await;

        assert_eq!(cache.get("k").await.as_deref(), Some("new"));
        assert_eq!(cache.stats().await.size, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_absent_before_sweep() {
        let cache = TtlCache::new(Duration::from_secs(10), HOUR);
        cache.set("k", "v").await;

        tokio::time::advance(Duration::from_secs(9)).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await, None);

        // The lookup did not remove it; only the sweep does.
        assert_eq!(cache.stats().await.size, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_refreshes_expiry() {
        let cache = TtlCache::new(Duration::from_secs(10), HOUR);
        cache.set("k", "v1").await;

        tokio::time::advance(Duration::from_secs(8)).await;
        cache.set("k", "v2").await;

        tokio::time::advance(Duration::from_secs(8)).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_only_expired() {
        let cache = TtlCache::new(Duration::from_secs(10), Duration::from_secs(30));
        cache.set("old", "1").await;

        tokio::time::sleep(Duration::from_secs(25)).await;
        cache.set("fresh", "2").await;
        assert_eq!(cache.stats().await.size, 2);

        // The first sweep fires at t=30.
        tokio::time::sleep(Duration::from_secs(6)).await;

        let stats = cache.stats().await;
        assert_eq!(stats.size, 1);
        assert_eq!(cache.get("fresh").await.as_deref(), Some("2"));
        assert_eq!(cache.get("old").await, None);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = TtlCache::new(Duration::from_secs(60), HOUR);
        cache.set("a", "1").await;
        cache.set("b", "2").await;
        cache.clear().await;

        assert_eq!(cache.stats().await.size, 0);
        assert_eq!(cache.get("a").await, None);
    }

    #[tokio::test]
    async fn test_stats() {
        let cache = TtlCache::new(Duration::from_secs(60), HOUR);
        cache.set("a", "1").await;

        assert_eq!(cache.stats().await, CacheStats { size: 1, ttl_seconds: 60 });
        assert_eq!(cache.ttl(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroy_stops_sweep_and_clears() {
        let cache = TtlCache::new(Duration::from_secs(10), Duration::from_secs(30));
        cache.set("k", "v").await;

        cache.destroy().await;
        assert_eq!(cache.stats().await.size, 0);
        assert!(cache.sweeper.lock().await.is_none());

        // A second call is harmless.
        cache.destroy().await;
        assert_eq!(cache.stats().await.size, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sweep_after_destroy() {
        let cache = TtlCache::new(Duration::from_secs(1), Duration::from_secs(5));
        cache.destroy().await;

        // Entries written after shutdown are never reclaimed by a sweep.
        cache.set("late", "v").await;
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(cache.stats().await.size, 1);
        assert_eq!(cache.get("late").await, None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_set_get() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(60), Duration::from_millis(5)));
        let mut handles = Vec::new();

        for task in 0..16 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                for i in 0..200 {
                    cache.set(format!("own-{task}-{i}"), format!("{task}:{i}")).await;
                    cache.set(format!("shared-{}", i % 10), format!("{task}:{i}")).await;
                    let _ = cache.get(&format!("shared-{}", (i + 3) % 10)).await;
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.stats().await.size, 16 * 200 + 10);
        for task in 0..16 {
            for i in 0..200 {
                let value = cache.get(&format!("own-{task}-{i}")).await;
                assert_eq!(value, Some(format!("{task}:{i}")));
            }
        }
        for slot in 0..10 {
            let value = cache.get(&format!("shared-{slot}")).await.unwrap();
            let (_, i) = value.split_once(':').unwrap();
            assert_eq!(i.parse::<usize>().unwrap() % 10, slot);
        }

        cache.destroy().await;
    }

    #[tokio::test]
    async fn test_huge_ttl_does_not_overflow() {
        let cache = TtlCache::new(Duration::from_secs(u64::MAX), Duration::from_secs(u64::MAX));
        cache.set("k", "v").await;

        assert_eq!(cache.get("k").await.as_deref(), Some("v"));
        cache.destroy().await;
    }

    #[test]
    fn test_deadline_after_saturates() {
        let now = Instant::now();
        assert_eq!(deadline_after(now, Duration::from_secs(5)), now + Duration::from_secs(5));
        assert!(deadline_after(now, Duration::MAX) > now);
    }
}
