//! Process-local token store
//!
//! Entries carry their own deadline and are treated as absent once it has
//! passed. Expired entries are purged lazily on writes. Deadlines use
//! `tokio::time::Instant`, so paused-clock tests can drive expiry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use tg_core::errors::{StoreError, StoreResult};
use tg_core::services::TokenStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Longest lifetime an entry can be given; longer TTLs are capped
const MAX_ENTRY_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

fn deadline(now: Instant, ttl: Duration) -> Instant {
    now.checked_add(ttl.min(MAX_ENTRY_TTL)).unwrap_or(now)
}

/// In-memory token store for development and tests
///
/// Not shared between processes; use the Redis store for anything that runs
/// more than one instance.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    entries: Mutex<HashMap<String, Entry>>,
    key_prefix: Option<String>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that namespaces keys the same way the Redis store does
    pub fn with_prefix(key_prefix: Option<String>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            key_prefix,
        }
    }

    fn full_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remaining lifetime of a live entry
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .get(&self.full_key(key))
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.expires_at - now)
    }

    /// Drop every expired entry; returns how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(
            self.full_key(key),
            Entry {
                value: value.to_string(),
                expires_at: deadline(now, ttl),
            },
        );
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.is_live(now));

        let key = self.full_key(key);
        if entries.contains_key(&key) {
            return Ok(false);
        }
        entries.insert(
            key,
            Entry {
                value: value.to_string(),
                expires_at: deadline(now, ttl),
            },
        );
        Ok(true)
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .lock()
            .await
            .get(&self.full_key(key))
            .map_or(false, |entry| entry.is_live(now)))
    }

    async fn get(&self, key: &str) -> StoreResult<String> {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .get(&self.full_key(key))
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .lock()
            .await
            .remove(&self.full_key(key))
            .map_or(false, |entry| entry.is_live(now)))
    }
}
