//! Time-bounded memo for read-mostly remote data
//!
//! Entries are looked up by string key and dropped lazily: a read that finds
//! an entry older than the TTL removes it and reports a miss. Callers pass
//! the current time so the cache works the same under real and virtual
//! clocks.

use crate::config::CacheConfig;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug)]
struct Entry<V> {
    stored_at: DateTime<Utc>,
    value: V,
}

#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached value for `key`, unless it is older than the TTL at `now`
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<V> {
        let mut entries = self.lock();
        let entry = entries.get(key)?;
        if self.expired(entry.stored_at, now) {
            entries.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    pub fn insert(&self, key: impl Into<String>, value: V, now: DateTime<Utc>) {
        self.lock().insert(
            key.into(),
            Entry {
                stored_at: now,
                value,
            },
        );
    }

    pub fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn expired(&self, stored_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        chrono::Duration::from_std(self.ttl).is_ok_and(|ttl| now - stored_at > ttl)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(CacheConfig::TTL)
    }
}
