//! Backing TTL key/value store interface.
//!
//! [`ResponseCache`](crate::ResponseCache) talks to its backing store
//! through the narrow [`Store`] trait: single and batch get/set plus
//! independent expiry refresh. The store is strictly best-effort — the
//! cache holds an `Option<Arc<dyn Store>>` and degrades every operation
//! to a miss/no-op when the store is absent or failing.
//!
//! # Atomicity
//!
//! The cache needs no cross-key transactions. Entries are
//! content-addressed and idempotent to rewrite, so concurrent writers for
//! the same key race harmlessly; ordinary multi-key get/set semantics
//! suffice.
//!
//! # Implementations
//!
//! [`MemoryStore`] is the in-process implementation shipped with this
//! crate (moka-backed, per-entry sliding TTL). Shared deployments plug in
//! their own implementation over redis or similar — the key and value
//! formats are plain strings precisely so any string KV store fits.

mod memory;

pub use memory::MemoryStore;

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// Narrow interface over a TTL key/value store.
///
/// Values are UTF-8 strings: every value this crate stores is either a
/// JSON document or a key pointer.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch a single value. `Ok(None)` on absent or expired keys.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Fetch many values in one round trip.
    ///
    /// Order-preserving: the result has the same length as `keys`, with
    /// `None` in every position whose key was absent.
    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<String>>>;

    /// Write a value with a time-to-live. Unconditional overwrite.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Write many values in one round trip.
    ///
    /// Carries no TTL — callers follow up with [`expire`](Store::expire)
    /// per key, mirroring redis `MSET` semantics.
    async fn mset(&self, pairs: &[(String, String)]) -> Result<()>;

    /// Reset a key's time-to-live. Returns whether the key existed.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// List keys matching a pattern: exact string, or trailing-`*`
    /// prefix glob. Diagnostic use only — never on the hot path.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;
}
