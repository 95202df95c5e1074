//! Feedback submitted asynchronously against an earlier prediction.

use serde::{Deserialize, Serialize};

use super::Meta;

/// A feedback event: ground truth and/or a reward arriving after the
/// fact, carrying only the correlation id of the prediction it scores.
///
/// `request`, `response` and `meta` are usually absent on arrival —
/// [`FeedbackResolver::reconcile`](crate::FeedbackResolver::reconcile)
/// fills them from the cache so downstream feedback processing sees the
/// full context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback<R, S> {
    /// Correlation id of the original prediction.
    pub correlation_id: String,

    /// The original request, once reconciled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<R>,

    /// The response that was served, once reconciled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<S>,

    /// Metadata the response was produced under, once reconciled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// Scalar reward signal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<f64>,

    /// Ground-truth response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truth: Option<S>,
}

impl<R, S> Feedback<R, S> {
    /// Feedback carrying only a correlation id, to be reconciled.
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            request: None,
            response: None,
            meta: None,
            reward: None,
            truth: None,
        }
    }

    pub fn with_reward(mut self, reward: f64) -> Self {
        self.reward = Some(reward);
        self
    }

    pub fn with_truth(mut self, truth: S) -> Self {
        self.truth = Some(truth);
        self
    }

    /// Whether the original request/response context is present.
    pub fn is_reconciled(&self) -> bool {
        self.request.is_some() && self.response.is_some()
    }
}
