//! Feedback resolution over the response cache.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::Result;
use crate::cache::ResponseCache;
use crate::telemetry;
use crate::types::{CacheEntry, Feedback};

/// Read-only view over a [`ResponseCache`] that reunites a feedback
/// event — which carries only a correlation id — with the request and
/// response it is scoring.
///
/// Resolution can legitimately come up empty: the id was never cached
/// (policy rejection, degraded store) or the entry's TTL lapsed. Callers
/// must treat `None` as "no cached context available", not an error.
pub struct FeedbackResolver<R, S> {
    cache: Arc<ResponseCache<R, S>>,
}

impl<R, S> FeedbackResolver<R, S>
where
    R: Serialize + DeserializeOwned + Send + Sync,
    S: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(cache: Arc<ResponseCache<R, S>>) -> Self {
        Self { cache }
    }

    /// Resolve a correlation id to the full stored
    /// request/response/metadata triple.
    pub async fn resolve(&self, correlation_id: &str) -> Result<Option<CacheEntry<R, S>>> {
        let entry = self.cache.entry(correlation_id).await?;
        let outcome = if entry.is_some() { "resolved" } else { "missing" };
        metrics::counter!(telemetry::FEEDBACK_RESOLUTIONS_TOTAL, "outcome" => outcome)
            .increment(1);
        Ok(entry)
    }

    /// Fill a feedback's missing request/response/metadata from the
    /// cache entry its correlation id names.
    ///
    /// Already-present fields are kept — feedback that arrived with its
    /// own context wins over the cache. Unresolvable feedback passes
    /// through unchanged.
    pub async fn reconcile(&self, mut feedback: Feedback<R, S>) -> Result<Feedback<R, S>> {
        if feedback.is_reconciled() {
            return Ok(feedback);
        }
        let Some(entry) = self.resolve(&feedback.correlation_id).await? else {
            debug!(
                correlation_id = %feedback.correlation_id,
                "no cached context for feedback"
            );
            return Ok(feedback);
        };

        if feedback.request.is_none() {
            feedback.request = Some(entry.request);
        }
        if feedback.response.is_none() {
            feedback.response = Some(entry.response);
        }
        if feedback.meta.is_none() {
            feedback.meta = Some(entry.meta);
        }
        debug!(
            correlation_id = %feedback.correlation_id,
            "feedback reconstructed from cache"
        );
        Ok(feedback)
    }
}

impl<R, S> Clone for FeedbackResolver<R, S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}
