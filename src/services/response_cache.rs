use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub created_at: DateTime<Utc>,
}

/// Thread-safe response cache with a single TTL per instance.
///
/// Expiry is only checked on read. Stale entries stay in the map until the next
/// `put` for the same key overwrites them; nothing is evicted in the background.
#[derive(Clone)]
pub struct ResponseCache<T> {
    entries: Arc<DashMap<String, CacheEntry<T>>>,
    ttl: Duration,
}

impl<T: Clone> ResponseCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.get_at(key, Utc::now())
    }

    /// Look up `key` as if the current time were `now`.
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<T> {
        let entry = self.entries.get(key)?;
        if now - entry.created_at < self.ttl {
            debug!("Cache hit for {}", key);
            Some(entry.data.clone())
        } else {
            debug!("Cache entry for {} is stale", key);
            None
        }
    }

    pub fn put(&self, key: String, data: T) {
        self.put_at(key, data, Utc::now());
    }

    pub fn put_at(&self, key: String, data: T, created_at: DateTime<Utc>) {
        debug!("Caching {}", key);
        self.entries.insert(key, CacheEntry { data, created_at });
        debug!("Response cache holds {} entries", self.len());
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub fn local_jobs_key(page: u32, distance: u32) -> String {
    format!("local_jobs_page_{}_distance_{}", page, distance)
}

pub fn remote_jobs_key(page: u32) -> String {
    format!("remote_jobs_page_{}", page)
}
