//! Tests for cache eligibility policies.

use muninn::{CacheAll, CachePolicy, Meta, PREDICTIVE_UNIT_TAG, PredictiveUnitPolicy};
use serde_json::{Value, json};

fn request() -> Value {
    json!({"x": 1})
}

fn response() -> Value {
    json!({"y": 2})
}

// =========================================================================
// PredictiveUnitPolicy
// =========================================================================

#[test]
fn accepts_response_from_own_unit() {
    let policy = PredictiveUnitPolicy::new("0");
    let meta = Meta::for_unit("req-1", "0");
    assert!(policy.should_cache(&request(), &response(), &meta));
}

#[test]
fn rejects_response_from_other_unit() {
    // Intermediate/ensemble members' responses are never cached.
    let policy = PredictiveUnitPolicy::new("0");
    let meta = Meta::for_unit("req-1", "ensemble-member-2");
    assert!(!policy.should_cache(&request(), &response(), &meta));
}

#[test]
fn rejects_untagged_response() {
    let policy = PredictiveUnitPolicy::new("0");
    let meta = Meta::new("req-1");
    assert!(!policy.should_cache(&request(), &response(), &meta));
}

#[test]
fn rejects_non_string_tag_value() {
    let policy = PredictiveUnitPolicy::new("0");
    let meta = Meta::new("req-1").with_tag(PREDICTIVE_UNIT_TAG, json!(0));
    assert!(!policy.should_cache(&request(), &response(), &meta));
}

// =========================================================================
// CacheAll
// =========================================================================

#[test]
fn cache_all_accepts_anything() {
    let meta = Meta::new("req-1");
    assert!(CacheAll.should_cache(&request(), &response(), &meta));
}
