//! Core ModelExecutor trait

use async_trait::async_trait;

use crate::Result;

/// The model-execution seam the cache orchestration calls through.
///
/// Implementations turn a request into a response — a model forward
/// pass, a routing decision, a remote call. The trait is deliberately
/// pure: no metadata, no caching concerns; those belong to
/// [`CachedPredictor`](crate::CachedPredictor).
///
/// Implementations report failures as [`Error::Executor`]
/// (or any other crate error variant that fits).
///
/// [`Error::Executor`]: crate::Error::Executor
#[async_trait]
pub trait ModelExecutor<R, S>: Send + Sync
where
    R: Sync,
    S: Send,
{
    /// Compute the response for one request.
    async fn predict(&self, request: &R) -> Result<S>;

    /// Compute responses for a batch, order-preserving.
    ///
    /// Default: sequential fallback. Implementations with a real batch
    /// path (vectorized inference, one RPC) should override.
    async fn predict_batch(&self, requests: &[&R]) -> Result<Vec<S>> {
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.predict(request).await?);
        }
        Ok(responses)
    }
}
