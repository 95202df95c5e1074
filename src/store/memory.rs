//! In-process store implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::sync::Cache;

use crate::Result;

use super::Store;

/// Default maximum number of entries.
const DEFAULT_MAX_ENTRIES: u64 = 10_000;

#[derive(Clone)]
struct StoredValue {
    value: String,
    /// `None` until a TTL is assigned (e.g. between `mset` and `expire`).
    ttl: Option<Duration>,
}

/// Expiry policy that reads each entry's own TTL.
///
/// Returning the entry's TTL from the read/update hooks slides the
/// expiration window on every access.
struct PerEntryTtl;

impl Expiry<String, StoredValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_read(
        &self,
        _key: &String,
        value: &StoredValue,
        _read_at: Instant,
        _duration_until_expiry: Option<Duration>,
        _last_modified_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// In-process [`Store`] over a moka cache with per-entry sliding TTL.
///
/// Each entry expires on its own TTL, and every read or overwrite resets
/// the window. Suitable for single-instance deployments and tests; shared
/// deployments want a store that outlives the process.
pub struct MemoryStore {
    entries: Cache<String, StoredValue>,
}

impl MemoryStore {
    /// Create a store with the default capacity (10,000 entries).
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    /// Create a store with a custom capacity.
    pub fn with_max_entries(max: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max)
            .expire_after(PerEntryTtl)
            .build();
        Self { entries }
    }

    /// Number of live entries (approximate until pending tasks run).
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(pattern: &str, key: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => key == pattern,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value))
    }

    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
        Ok(keys
            .iter()
            .map(|key| self.entries.get(key).map(|v| v.value))
            .collect())
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries.insert(
            key.to_owned(),
            StoredValue {
                value: value.to_owned(),
                ttl: Some(ttl),
            },
        );
        Ok(())
    }

    async fn mset(&self, pairs: &[(String, String)]) -> Result<()> {
        for (key, value) in pairs {
            self.entries.insert(
                key.clone(),
                StoredValue {
                    value: value.clone(),
                    ttl: None,
                },
            );
        }
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        match self.entries.get(key) {
            Some(mut stored) => {
                stored.ttl = Some(ttl);
                self.entries.insert(key.to_owned(), stored);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        self.entries.run_pending_tasks();
        Ok(self
            .entries
            .iter()
            .filter(|(key, _)| matches(pattern, key.as_str()))
            .map(|(key, _)| key.as_ref().clone())
            .collect())
    }
}
