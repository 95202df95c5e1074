//! Muninn - Content-addressed response cache for model serving
//!
//! This crate memoizes inference results under a deterministic content
//! key and keeps a secondary correlation-id index, so feedback arriving
//! hours later — carrying only a correlation id — can be reunited with
//! the exact request, response and metadata it is scoring. Batch callers
//! get partial resolution: cached positions are served from the store,
//! only the miss subset reaches the model, and the merged output
//! preserves the caller's input order.
//!
//! The backing store is best-effort by design: absent or failing, every
//! read degrades to a miss and every write to a no-op, and the serving
//! path keeps working on live computation alone.
//!
//! # Prediction Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use muninn::{
//!     CacheAll, CacheConfig, CachedPredictor, MemoryStore, Meta, ModelExecutor,
//!     ResponseCache, ServiceIdentity,
//! };
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct Input {
//!     x: f64,
//! }
//!
//! #[derive(Serialize, Deserialize)]
//! struct Output {
//!     y: f64,
//! }
//!
//! struct Doubler;
//!
//! #[async_trait::async_trait]
//! impl ModelExecutor<Input, Output> for Doubler {
//!     async fn predict(&self, request: &Input) -> muninn::Result<Output> {
//!         Ok(Output { y: request.x * 2.0 })
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> muninn::Result<()> {
//!     let cache = Arc::new(ResponseCache::new(
//!         CacheConfig::new(ServiceIdentity::new("doubler", "dep-1", "v1")),
//!         Some(Arc::new(MemoryStore::new())),
//!         Arc::new(CacheAll),
//!     ));
//!
//!     let predictor = CachedPredictor::new(Arc::clone(&cache), Doubler);
//!     let response = predictor
//!         .predict(&Meta::new("req-42"), &Input { x: 21.0 })
//!         .await?;
//!
//!     println!("{}", response.y);
//!     Ok(())
//! }
//! ```
//!
//! # Feedback Example
//!
//! ```rust,ignore
//! use muninn::{Feedback, FeedbackResolver};
//!
//! let resolver = FeedbackResolver::new(cache);
//!
//! // Hours later, ground truth arrives carrying only the correlation id.
//! let feedback = resolver
//!     .reconcile(Feedback::new("req-42").with_reward(1.0))
//!     .await?;
//!
//! assert!(feedback.is_reconciled());
//! ```

pub mod cache;
pub mod error;
pub mod predict;
pub mod store;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export main types at crate root
pub use error::{Error, Result};
pub use predict::{CachedPredictor, merge_responses};
pub use store::{MemoryStore, Store};
pub use traits::ModelExecutor;

// Re-export the caching subsystem
pub use cache::{
    CacheAll, CacheConfig, CachePolicy, FeedbackResolver, KeyScheme, PredictiveUnitPolicy,
    ResponseCache,
};

// Re-export all types
pub use types::{CacheEntry, Feedback, Meta, PREDICTIVE_UNIT_TAG, ServiceIdentity};
