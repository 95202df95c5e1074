//! Cache-aware prediction orchestration.
//!
//! [`CachedPredictor`] wires a [`ResponseCache`] in front of a
//! [`ModelExecutor`]: single predictions do get → miss → execute → set,
//! batches resolve partially against the cache and invoke the executor
//! only on the miss subset.
//!
//! # Order preservation
//!
//! Batch resolution is positional end to end: the miss subset keeps its
//! relative order when handed to the executor, and
//! [`merge_responses`] reassembles the full output in the caller's
//! original order. Nothing reorders hits or misses.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::ResponseCache;
use crate::error::{Error, Result};
use crate::traits::ModelExecutor;
use crate::types::Meta;

/// Merge cached hits with computed results for a batch operation.
///
/// Given the original lookup (`Some` = hit, `None` = miss) and the
/// computed responses for just the misses (in miss order), reassembles
/// the full output in original order. Pure and stable — the
/// order-preservation invariant lives entirely here.
///
/// # Panics
///
/// Panics if `computed` holds fewer responses than `cached` has `None`
/// slots. [`CachedPredictor::predict_batch`] validates the executor's
/// result count before calling this.
pub fn merge_responses<S>(cached: Vec<Option<S>>, computed: Vec<S>) -> Vec<S> {
    let mut computed = computed.into_iter();
    cached
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| {
                computed
                    .next()
                    .expect("fewer computed responses than miss slots")
            })
        })
        .collect()
}

/// A model executor fronted by a response cache.
pub struct CachedPredictor<R, S, E> {
    cache: Arc<ResponseCache<R, S>>,
    executor: E,
}

impl<R, S, E> CachedPredictor<R, S, E>
where
    R: Serialize + DeserializeOwned + Send + Sync + Clone,
    S: Serialize + DeserializeOwned + Send + Sync,
    E: ModelExecutor<R, S>,
{
    pub fn new(cache: Arc<ResponseCache<R, S>>, executor: E) -> Self {
        Self { cache, executor }
    }

    /// The cache this predictor resolves against.
    pub fn cache(&self) -> &ResponseCache<R, S> {
        &self.cache
    }

    /// Serve one request, from cache when possible.
    ///
    /// On a miss the executor runs and its response is written back
    /// (policy permitting) before being returned.
    pub async fn predict(&self, meta: &Meta, request: &R) -> Result<S> {
        if let Some(response) = self.cache.get(&meta.puid, request).await? {
            return Ok(response);
        }
        let response = self.executor.predict(request).await?;
        self.cache.set(request, &response, meta).await?;
        Ok(response)
    }

    /// Serve a batch, resolving partially against the cache.
    ///
    /// One [`ResponseCache::get_many`] up front; the executor sees only
    /// the miss subset (relative order preserved); exactly that computed
    /// subset is written back with [`ResponseCache::set_many`]; the
    /// output matches the input order position for position.
    ///
    /// An executor failure fails the whole batch call — entries already
    /// cached from the hit subset stay valid, nothing is rolled back.
    pub async fn predict_batch(&self, metas: &[Meta], requests: &[R]) -> Result<Vec<S>> {
        if metas.len() != requests.len() {
            return Err(Error::InvalidInput(format!(
                "got {} metas for {} requests",
                metas.len(),
                requests.len()
            )));
        }

        let correlation_ids: Vec<String> = metas.iter().map(|meta| meta.puid.clone()).collect();
        let cached = self.cache.get_many(&correlation_ids, requests).await?;

        let mut miss_requests = Vec::new();
        let mut miss_metas = Vec::new();
        for ((request, meta), slot) in requests.iter().zip(metas).zip(&cached) {
            if slot.is_none() {
                miss_requests.push(request.clone());
                miss_metas.push(meta.clone());
            }
        }

        if miss_requests.is_empty() {
            return Ok(cached.into_iter().flatten().collect());
        }

        debug!(
            batch = requests.len(),
            misses = miss_requests.len(),
            "executing uncached subset"
        );

        let miss_refs: Vec<&R> = miss_requests.iter().collect();
        let computed = self.executor.predict_batch(&miss_refs).await?;
        if computed.len() != miss_requests.len() {
            return Err(Error::Executor(format!(
                "executor returned {} responses for {} requests",
                computed.len(),
                miss_requests.len()
            )));
        }

        self.cache
            .set_many(&miss_requests, &computed, &miss_metas)
            .await?;

        Ok(merge_responses(cached, computed))
    }
}
