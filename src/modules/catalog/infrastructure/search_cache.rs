use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::modules::scan::domain::services::ScoredSearchResult;

/// How old a cached result is relative to the display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Young enough to display without refetching.
    Fresh,
    /// Still held, but a refetch should run before trusting it.
    Stale,
}

#[derive(Clone)]
struct CacheEntry {
    result: ScoredSearchResult,
    fetched_at: Instant,
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub stale_hits: u64,
    pub misses: u64,
    pub entries_count: usize,
    pub expired_cleanups: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.stale_hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits + self.stale_hits) as f64 / total as f64
        }
    }
}

/// Scored-search response cache keyed by the exact query-field tuple.
///
/// Purely a performance layer: every caller path behaves identically with an
/// empty cache, since re-querying the catalog is always safe and idempotent.
/// Entries turn stale after `stale_after` (display window) and are evicted
/// after `evict_after`.
pub struct SearchCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    hits: AtomicU64,
    stale_hits: AtomicU64,
    misses: AtomicU64,
    cleanups: Arc<AtomicU64>,
    cleanup_task_started: AtomicBool,
    stale_after: Duration,
    evict_after: Duration,
    max_entries: usize,
}

impl SearchCache {
    pub fn new(stale_after: Duration, evict_after: Duration, max_entries: usize) -> Arc<Self> {
        Arc::new(Self {
            entries: Arc::new(DashMap::new()),
            hits: AtomicU64::new(0),
            stale_hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            cleanups: Arc::new(AtomicU64::new(0)),
            cleanup_task_started: AtomicBool::new(false),
            stale_after,
            evict_after,
            max_entries,
        })
    }

    /// Default windows: 5 minutes to stale, 30 minutes to eviction.
    pub fn with_default_windows() -> Arc<Self> {
        Self::new(
            Duration::from_secs(5 * 60),
            Duration::from_secs(30 * 60),
            500,
        )
    }

    /// Look up a cached result together with its freshness. Entries past the
    /// eviction window are removed on access.
    pub fn get(&self, key: &str) -> Option<(ScoredSearchResult, Freshness)> {
        self.ensure_cleanup_task_started();

        if let Some(entry) = self.entries.get(key) {
            let age = entry.fetched_at.elapsed();

            if age > self.evict_after {
                drop(entry);
                self.entries.remove(key);
                debug!("evicted expired cache entry '{}'", key);
            } else if age > self.stale_after {
                self.stale_hits.fetch_add(1, Ordering::Relaxed);
                debug!("stale cache hit for '{}'", key);
                return Some((entry.result.clone(), Freshness::Stale));
            } else {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("cache hit for '{}'", key);
                return Some((entry.result.clone(), Freshness::Fresh));
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn insert(&self, key: &str, result: ScoredSearchResult) {
        self.ensure_cleanup_task_started();

        if self.entries.len() >= self.max_entries {
            self.evict_oldest_entries();
        }

        self.entries.insert(
            key.to_string(),
            CacheEntry {
                result,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.stale_hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        info!("search cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            stale_hits: self.stale_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries_count: self.entries.len(),
            expired_cleanups: self.cleanups.load(Ordering::Relaxed),
        }
    }

    /// Start the periodic expired-entry sweep once a runtime is available.
    fn ensure_cleanup_task_started(&self) {
        if tokio::runtime::Handle::try_current().is_err() {
            return;
        }
        if self
            .cleanup_task_started
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return;
        }

        let entries = self.entries.clone();
        let cleanups = self.cleanups.clone();
        let evict_after = self.evict_after;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(300));

            loop {
                interval.tick().await;

                let expired_keys: Vec<String> = entries
                    .iter()
                    .filter(|e| e.value().fetched_at.elapsed() > evict_after)
                    .map(|e| e.key().clone())
                    .collect();

                let expired_count = expired_keys.len();
                for key in expired_keys {
                    entries.remove(&key);
                }

                if expired_count > 0 {
                    cleanups.fetch_add(expired_count as u64, Ordering::Relaxed);
                    debug!("cleaned up {} expired cache entries", expired_count);
                }
            }
        });
    }

    /// Drop the oldest tenth of entries when the cache is full.
    fn evict_oldest_entries(&self) {
        let mut by_age: Vec<(String, Instant)> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().fetched_at))
            .collect();

        by_age.sort_by_key(|(_, fetched_at)| *fetched_at);

        let to_evict = (self.max_entries / 10).max(1);
        for (key, _) in by_age.into_iter().take(to_evict) {
            self.entries.remove(&key);
        }

        debug!("evicted {} oldest cache entries", to_evict);
    }
}
