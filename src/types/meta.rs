//! Request metadata accompanying every inference call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tag key naming the computation unit that produced a response.
///
/// In a multi-stage pipeline only the designated unit's responses are
/// authoritative; [`PredictiveUnitPolicy`](crate::PredictiveUnitPolicy)
/// compares this tag against the process's own unit id.
pub const PREDICTIVE_UNIT_TAG: &str = "predictive_unit_id";

/// Metadata travelling with a request through the serving pipeline.
///
/// `puid` is the correlation id: the identifier under which feedback for
/// this request will later arrive. It is normally supplied by the request
/// decoder (from a request-tracking header) or generated per request;
/// it defaults to empty.
///
/// Maps are `BTreeMap` so the canonical serialization used for hashing
/// and storage is stable regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Correlation id replayed on feedback submission.
    #[serde(default)]
    pub puid: String,

    /// Free-form tags; see [`PREDICTIVE_UNIT_TAG`].
    #[serde(default)]
    pub tags: BTreeMap<String, Value>,

    /// Routing decisions recorded per component id.
    #[serde(default)]
    pub routing: BTreeMap<String, i32>,

    /// Path the request took through the deployment graph.
    #[serde(default, rename = "requestPath")]
    pub request_path: BTreeMap<String, String>,
}

impl Meta {
    /// Create metadata carrying only a correlation id.
    pub fn new(puid: impl Into<String>) -> Self {
        Self {
            puid: puid.into(),
            ..Self::default()
        }
    }

    /// Create metadata stamped with the producing unit's id.
    ///
    /// The unit id is configuration passed in by the hosting service —
    /// it is never read from the environment here.
    pub fn for_unit(puid: impl Into<String>, unit_id: impl Into<String>) -> Self {
        Self::new(puid).with_tag(PREDICTIVE_UNIT_TAG, Value::String(unit_id.into()))
    }

    /// Add or overwrite a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: Value) -> Self {
        self.tags.insert(key.into(), value);
        self
    }

    /// Record a routing decision for a component.
    pub fn with_routing(mut self, component_id: impl Into<String>, decision: i32) -> Self {
        self.routing.insert(component_id.into(), decision);
        self
    }

    /// The producing unit's id, if tagged.
    pub fn unit_id(&self) -> Option<&str> {
        self.tags.get(PREDICTIVE_UNIT_TAG).and_then(Value::as_str)
    }

    /// The routing decision recorded for a given unit, if any.
    pub fn routing_decision(&self, unit_id: &str) -> Option<i32> {
        self.routing.get(unit_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_unit_stamps_tag() {
        let meta = Meta::for_unit("req-1", "0");
        assert_eq!(meta.puid, "req-1");
        assert_eq!(meta.unit_id(), Some("0"));
    }

    #[test]
    fn unit_id_absent_without_tag() {
        let meta = Meta::new("req-1");
        assert_eq!(meta.unit_id(), None);
    }

    #[test]
    fn routing_decision_lookup() {
        let meta = Meta::new("req-1").with_routing("router-a", 2);
        assert_eq!(meta.routing_decision("router-a"), Some(2));
        assert_eq!(meta.routing_decision("router-b"), None);
    }

    #[test]
    fn serializes_request_path_wire_name() {
        let mut meta = Meta::new("p");
        meta.request_path
            .insert("classifier".into(), "image:v1".into());
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("requestPath").is_some());
    }
}
