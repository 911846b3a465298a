//! In-process TTL cache for public read payloads.
//!
//! Entries expire after a fixed time-to-live and are also dropped
//! explicitly whenever the catalog or company settings change.
//!
//! Every invalidation bumps a generation counter. A reader captures the
//! generation before loading from the store and hands it back to
//! [`SiteCache::insert_if_current`], so a payload loaded before an
//! invalidation is never stored after it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;

/// Upper bound on cached keys.
const MAX_ENTRIES: usize = 64;

#[derive(Clone)]
struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// Key-value cache of JSON payloads with a shared TTL.
pub struct SiteCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Only changed while `entries` is write-locked.
    generation: AtomicU64,
}

impl SiteCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current invalidation generation. Capture it before a store read.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// A live entry for `key`, if any.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|e| e.stored_at.elapsed() <= self.ttl)
            .map(|e| e.value.clone())
    }

    /// Store `value`, evicting expired entries and, when full, the oldest one.
    pub async fn insert(&self, key: &str, value: Value) {
        let generation = self.generation();
        self.insert_if_current(key, value, generation).await;
    }

    /// Store `value` unless the cache was invalidated since `generation`
    /// was read. Returns `true` if the value was stored.
    pub async fn insert_if_current(&self, key: &str, value: Value, generation: u64) -> bool {
        if self.ttl.is_zero() {
            return false;
        }
        let mut entries = self.entries.write().await;
        if self.generation.load(Ordering::Acquire) != generation {
            return false;
        }
        entries.retain(|_, e| e.stored_at.elapsed() <= self.ttl);
        if entries.len() >= MAX_ENTRIES && !entries.contains_key(key) {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, e)| e.stored_at)
                .map(|(k, _)| k.clone())
            {
                entries.remove(&oldest);
            }
        }
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
        true
    }

    /// Drop `key` and start a new generation. Returns `true` if an entry
    /// was present.
    pub async fn invalidate(&self, key: &str) -> bool {
        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        entries.remove(key).is_some()
    }
}
