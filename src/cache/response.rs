//! Store-backed response cache with a feedback index.
//!
//! [`ResponseCache`] memoizes request → response pairs under a
//! content-addressed key and maintains a secondary index from correlation
//! id to content key, so a later feedback event carrying only the
//! correlation id can recover the full request/response/metadata triple.
//!
//! # Architecture
//!
//! The cache sits between the request decoder and the model executor: a
//! hit bypasses model execution entirely, a miss falls through and the
//! computed response is written back (policy permitting). All state lives
//! in the backing [`Store`]; the cache itself holds only immutable
//! configuration and is freely shared across concurrent request handlers
//! without locks. Coordination is delegated to the store's multi-key
//! primitives — entries are content-addressed and idempotent to rewrite,
//! so concurrent writers for the same key race harmlessly.
//!
//! # Key derivation
//!
//! See [`KeyScheme`]: content keys are a pure function of request content
//! and service identity, index keys of the correlation id. Two requests
//! with identical canonical serialization share one cached response, even
//! across callers.
//!
//! # TTL
//!
//! Content entry and index entry share the configured TTL, and every
//! successful read refreshes both — sliding-window expiration. The index
//! entry is (re)written on every hit under the *reader's* correlation id,
//! so any id that ever observed the content can later resolve it.
//!
//! # Degraded mode
//!
//! The store handle is an explicit `Option`; with no store, or when a
//! store call fails (timeouts included), reads degrade to misses and
//! writes to no-ops. A warning is logged once per call-site category, and
//! a degraded-operation counter is incremented — cache availability is
//! best-effort and never a point of failure for serving.

use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::key::{KeyScheme, canonical_json};
use crate::cache::policy::CachePolicy;
use crate::error::{Error, Result};
use crate::store::Store;
use crate::telemetry;
use crate::types::{CacheEntry, Meta, ServiceIdentity};

/// Configuration for the response cache.
///
/// ```rust
/// # use muninn::{CacheConfig, ServiceIdentity};
/// # use std::time::Duration;
/// let config = CacheConfig::new(ServiceIdentity::new("scorer", "dep-1", "v3"))
///     .ttl(Duration::from_secs(3600));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Identity triple namespacing every key. Supplied by the hosting
    /// service.
    pub identity: ServiceIdentity,
    /// Time-to-live for entries and index entries. Default: 24 hours.
    pub ttl: Duration,
}

impl CacheConfig {
    pub fn new(identity: ServiceIdentity) -> Self {
        Self {
            identity,
            ttl: Duration::from_secs(24 * 3600),
        }
    }

    /// Set the entry time-to-live.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Call-site categories for the once-per-category degraded warning.
#[derive(Debug, Clone, Copy)]
enum OpKind {
    Read,
    Write,
    Resolve,
    Diagnostic,
}

impl OpKind {
    fn as_str(self) -> &'static str {
        match self {
            OpKind::Read => "read",
            OpKind::Write => "write",
            OpKind::Resolve => "resolve",
            OpKind::Diagnostic => "diagnostic",
        }
    }
}

#[derive(Default)]
struct DegradedWarnings {
    read: AtomicBool,
    write: AtomicBool,
    resolve: AtomicBool,
    diagnostic: AtomicBool,
}

impl DegradedWarnings {
    fn flag(&self, kind: OpKind) -> &AtomicBool {
        match kind {
            OpKind::Read => &self.read,
            OpKind::Write => &self.write,
            OpKind::Resolve => &self.resolve,
            OpKind::Diagnostic => &self.diagnostic,
        }
    }

    /// Record a degraded operation; warn only the first time per
    /// category to keep a down backend from flooding the logs.
    fn note(&self, kind: OpKind, operation: &'static str, cause: &str) {
        metrics::counter!(telemetry::STORE_DEGRADED_TOTAL, "operation" => operation).increment(1);
        if !self.flag(kind).swap(true, Ordering::Relaxed) {
            warn!(
                category = kind.as_str(),
                cause, "store unavailable, cache degraded to no-op"
            );
        }
    }
}

/// Borrowed view of a [`CacheEntry`] so `set` can serialize without
/// cloning the request and response. Field names must match
/// [`CacheEntry`].
#[derive(Serialize)]
struct EntryRef<'a, R, S> {
    request: &'a R,
    response: &'a S,
    meta: &'a Meta,
}

/// Content-addressed response cache with a correlation-id index.
///
/// Generic over the request and response types; the routing use case
/// (integer decisions) is just a second monomorphic instantiation, e.g.
/// `ResponseCache<MyInput, i32>`.
pub struct ResponseCache<R, S> {
    keys: KeyScheme,
    ttl: Duration,
    store: Option<Arc<dyn Store>>,
    policy: Arc<dyn CachePolicy<R, S>>,
    degraded: DegradedWarnings,
    _marker: PhantomData<fn() -> (R, S)>,
}

impl<R, S> ResponseCache<R, S>
where
    R: Serialize + DeserializeOwned + Send + Sync,
    S: Serialize + DeserializeOwned + Send + Sync,
{
    /// Create a cache over an optional backing store.
    ///
    /// `store: None` is the explicit degraded mode — every read misses,
    /// every write is a no-op (§degraded-mode module docs).
    pub fn new(
        config: CacheConfig,
        store: Option<Arc<dyn Store>>,
        policy: Arc<dyn CachePolicy<R, S>>,
    ) -> Self {
        Self {
            keys: KeyScheme::new(config.identity),
            ttl: config.ttl,
            store,
            policy,
            degraded: DegradedWarnings::default(),
            _marker: PhantomData,
        }
    }

    /// The key scheme this cache derives keys with.
    pub fn key_scheme(&self) -> &KeyScheme {
        &self.keys
    }

    /// Look up the cached response for a request.
    ///
    /// On hit, slides the entry's TTL and (re)points this correlation
    /// id's index entry at the content key, then returns the response.
    /// On miss returns `Ok(None)` — never an error. A malformed stored
    /// document is `Err(Error::Json)`.
    pub async fn get(&self, correlation_id: &str, request: &R) -> Result<Option<S>> {
        let Some(store) = self.store.as_ref() else {
            self.degraded
                .note(OpKind::Read, "get", "store not configured");
            return Ok(None);
        };

        let content_key = self.keys.content_key(request)?;
        let raw = match store.get(&content_key).await {
            Ok(raw) => raw,
            Err(e) => {
                self.degraded.note(OpKind::Read, "get", &e.to_string());
                return Ok(None);
            }
        };
        let Some(raw) = raw else {
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => "get").increment(1);
            return Ok(None);
        };

        let entry: CacheEntry<R, S> = serde_json::from_str(&raw)?;

        let refresh = async {
            store
                .set(&self.keys.index_key(correlation_id), &content_key, self.ttl)
                .await?;
            store.expire(&content_key, self.ttl).await?;
            Ok::<_, Error>(())
        };
        if let Err(e) = refresh.await {
            self.degraded.note(OpKind::Read, "get", &e.to_string());
        }

        metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => "get").increment(1);
        debug!(%content_key, correlation_id, "cache hit");
        Ok(Some(entry.response))
    }

    /// Store a response, policy permitting.
    ///
    /// Writes the index entry (correlation id → content key) and the
    /// content entry, both with the configured TTL. Unconditional
    /// overwrites — content-addressing makes concurrent writers for the
    /// same key write equivalent values.
    pub async fn set(&self, request: &R, response: &S, meta: &Meta) -> Result<()> {
        let Some(store) = self.store.as_ref() else {
            self.degraded
                .note(OpKind::Write, "set", "store not configured");
            return Ok(());
        };

        if !self.policy.should_cache(request, response, meta) {
            metrics::counter!(telemetry::CACHE_REJECTED_TOTAL, "operation" => "set").increment(1);
            debug!(correlation_id = %meta.puid, "response rejected by caching policy");
            return Ok(());
        }

        let content_key = self.keys.content_key(request)?;
        let document = canonical_json(&EntryRef {
            request,
            response,
            meta,
        })?;

        let write = async {
            store
                .set(&self.keys.index_key(&meta.puid), &content_key, self.ttl)
                .await?;
            store.set(&content_key, &document, self.ttl).await?;
            Ok::<_, Error>(())
        };
        match write.await {
            Ok(()) => {
                metrics::counter!(telemetry::CACHE_WRITES_TOTAL, "operation" => "set")
                    .increment(1);
                debug!(%content_key, correlation_id = %meta.puid, "cached response");
            }
            Err(e) => self.degraded.note(OpKind::Write, "set", &e.to_string()),
        }
        Ok(())
    }

    /// Batch lookup: one `mget`, order-preserving, one slot per input.
    ///
    /// For every positional hit the index entry for that position's
    /// correlation id is batch-(re)written and the hit keys' TTLs are
    /// refreshed. Returns `None` in every position without an entry.
    pub async fn get_many(
        &self,
        correlation_ids: &[String],
        requests: &[R],
    ) -> Result<Vec<Option<S>>> {
        if correlation_ids.len() != requests.len() {
            return Err(Error::InvalidInput(format!(
                "got {} correlation ids for {} requests",
                correlation_ids.len(),
                requests.len()
            )));
        }

        let Some(store) = self.store.as_ref() else {
            self.degraded
                .note(OpKind::Read, "get_many", "store not configured");
            return Ok(requests.iter().map(|_| None).collect());
        };

        let content_keys = requests
            .iter()
            .map(|request| self.keys.content_key(request))
            .collect::<Result<Vec<_>>>()?;

        let raws = match store.mget(&content_keys).await {
            Ok(raws) if raws.len() == content_keys.len() => raws,
            Ok(_) => {
                self.degraded
                    .note(OpKind::Read, "get_many", "mget result length mismatch");
                return Ok(requests.iter().map(|_| None).collect());
            }
            Err(e) => {
                self.degraded.note(OpKind::Read, "get_many", &e.to_string());
                return Ok(requests.iter().map(|_| None).collect());
            }
        };

        let mut responses = Vec::with_capacity(raws.len());
        for raw in &raws {
            match raw {
                Some(raw) => {
                    let entry: CacheEntry<R, S> = serde_json::from_str(raw)?;
                    responses.push(Some(entry.response));
                }
                None => responses.push(None),
            }
        }

        let hits: Vec<(String, String)> = correlation_ids
            .iter()
            .zip(&content_keys)
            .zip(&responses)
            .filter(|(_, response)| response.is_some())
            .map(|((id, content_key), _)| (self.keys.index_key(id), content_key.clone()))
            .collect();

        let hit_count = hits.len() as u64;
        metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => "get_many")
            .increment(hit_count);
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => "get_many")
            .increment(responses.len() as u64 - hit_count);

        if !hits.is_empty() {
            let refresh = async {
                store.mset(&hits).await?;
                for (index_key, content_key) in &hits {
                    store.expire(index_key, self.ttl).await?;
                    store.expire(content_key, self.ttl).await?;
                }
                Ok::<_, Error>(())
            };
            if let Err(e) = refresh.await {
                self.degraded.note(OpKind::Read, "get_many", &e.to_string());
            }
        }

        debug!(
            batch = requests.len(),
            hits = hit_count,
            "batch cache lookup"
        );
        Ok(responses)
    }

    /// Batch store: the policy-accepted subset is written with one
    /// batched `mset` for content entries and one for index entries,
    /// then every newly written key's TTL is set. Rejected positions are
    /// silently skipped.
    pub async fn set_many(&self, requests: &[R], responses: &[S], metas: &[Meta]) -> Result<()> {
        if requests.len() != responses.len() || requests.len() != metas.len() {
            return Err(Error::InvalidInput(format!(
                "got {} requests, {} responses, {} metas",
                requests.len(),
                responses.len(),
                metas.len()
            )));
        }

        let Some(store) = self.store.as_ref() else {
            self.degraded
                .note(OpKind::Write, "set_many", "store not configured");
            return Ok(());
        };

        let mut content_entries = Vec::new();
        let mut index_entries = Vec::new();
        let mut rejected = 0u64;
        for ((request, response), meta) in requests.iter().zip(responses).zip(metas) {
            if !self.policy.should_cache(request, response, meta) {
                rejected += 1;
                continue;
            }
            let content_key = self.keys.content_key(request)?;
            let document = canonical_json(&EntryRef {
                request,
                response,
                meta,
            })?;
            index_entries.push((self.keys.index_key(&meta.puid), content_key.clone()));
            content_entries.push((content_key, document));
        }

        if rejected > 0 {
            metrics::counter!(telemetry::CACHE_REJECTED_TOTAL, "operation" => "set_many")
                .increment(rejected);
            debug!(rejected, "responses rejected by caching policy");
        }
        if content_entries.is_empty() {
            return Ok(());
        }

        let write = async {
            store.mset(&content_entries).await?;
            store.mset(&index_entries).await?;
            for (key, _) in content_entries.iter().chain(&index_entries) {
                store.expire(key, self.ttl).await?;
            }
            Ok::<_, Error>(())
        };
        match write.await {
            Ok(()) => {
                metrics::counter!(telemetry::CACHE_WRITES_TOTAL, "operation" => "set_many")
                    .increment(content_entries.len() as u64);
                debug!(stored = content_entries.len(), "cached batch responses");
            }
            Err(e) => self.degraded.note(OpKind::Write, "set_many", &e.to_string()),
        }
        Ok(())
    }

    /// Resolve a correlation id to the full stored entry.
    ///
    /// Two-step lookup: index entry names the content key, content key
    /// yields the entry. An absent index, or an index pointing at an
    /// entry that expired in between (TTL race), is `Ok(None)` — callers
    /// treat it as "no cached context available". Successful resolution
    /// slides both keys' TTLs.
    pub async fn entry(&self, correlation_id: &str) -> Result<Option<CacheEntry<R, S>>> {
        let Some(store) = self.store.as_ref() else {
            self.degraded
                .note(OpKind::Resolve, "resolve", "store not configured");
            return Ok(None);
        };

        let index_key = self.keys.index_key(correlation_id);
        let content_key = match store.get(&index_key).await {
            Ok(key) => key,
            Err(e) => {
                self.degraded.note(OpKind::Resolve, "resolve", &e.to_string());
                return Ok(None);
            }
        };
        let Some(content_key) = content_key else {
            return Ok(None);
        };

        let raw = match store.get(&content_key).await {
            Ok(raw) => raw,
            Err(e) => {
                self.degraded.note(OpKind::Resolve, "resolve", &e.to_string());
                return Ok(None);
            }
        };
        let Some(raw) = raw else {
            return Ok(None);
        };

        let entry: CacheEntry<R, S> = serde_json::from_str(&raw)?;

        let refresh = async {
            store.expire(&index_key, self.ttl).await?;
            store.expire(&content_key, self.ttl).await?;
            Ok::<_, Error>(())
        };
        if let Err(e) = refresh.await {
            self.degraded.note(OpKind::Resolve, "resolve", &e.to_string());
        }

        debug!(correlation_id, %content_key, "resolved correlation id");
        Ok(Some(entry))
    }

    /// List every stored entry for this service identity.
    ///
    /// Diagnostic only — `keys(pattern)` + `mget`, skipping keys that
    /// expire between the two calls. Not on the hot path.
    pub async fn entries(&self) -> Result<Vec<CacheEntry<R, S>>> {
        let Some(store) = self.store.as_ref() else {
            self.degraded
                .note(OpKind::Diagnostic, "entries", "store not configured");
            return Ok(Vec::new());
        };

        let keys = match store.keys(&self.keys.content_key_pattern()).await {
            Ok(keys) => keys,
            Err(e) => {
                self.degraded
                    .note(OpKind::Diagnostic, "entries", &e.to_string());
                return Ok(Vec::new());
            }
        };
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let raws = match store.mget(&keys).await {
            Ok(raws) => raws,
            Err(e) => {
                self.degraded
                    .note(OpKind::Diagnostic, "entries", &e.to_string());
                return Ok(Vec::new());
            }
        };

        raws.iter()
            .flatten()
            .map(|raw| serde_json::from_str(raw).map_err(Error::from))
            .collect()
    }
}
