//! Cache eligibility policies.

use crate::types::Meta;

/// Decides, per response, whether it may populate the cache.
///
/// Evaluated independently per item in batch operations. Rejection is
/// never an error — the response is simply served without being stored.
pub trait CachePolicy<R, S>: Send + Sync {
    fn should_cache(&self, request: &R, response: &S, meta: &Meta) -> bool;
}

/// Cache only responses produced by the deployment's authoritative unit.
///
/// In a multi-stage pipeline, intermediate and ensemble members' outputs
/// pass through the same serving path as the final answer; only the
/// designated predictive unit's responses are safe to memoize. The check
/// compares the [`PREDICTIVE_UNIT_TAG`](crate::PREDICTIVE_UNIT_TAG)
/// metadata tag against this process's own unit id.
#[derive(Debug, Clone)]
pub struct PredictiveUnitPolicy {
    unit_id: String,
}

impl PredictiveUnitPolicy {
    /// `unit_id` is this process's unit id, passed in by the hosting
    /// service.
    pub fn new(unit_id: impl Into<String>) -> Self {
        Self {
            unit_id: unit_id.into(),
        }
    }
}

impl<R, S> CachePolicy<R, S> for PredictiveUnitPolicy {
    fn should_cache(&self, _request: &R, _response: &S, meta: &Meta) -> bool {
        meta.unit_id() == Some(self.unit_id.as_str())
    }
}

/// Cache everything. For single-stage deployments and tests.
#[derive(Debug, Clone, Default)]
pub struct CacheAll;

impl<R, S> CachePolicy<R, S> for CacheAll {
    fn should_cache(&self, _request: &R, _response: &S, _meta: &Meta) -> bool {
        true
    }
}
