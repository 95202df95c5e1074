//! Tests for [`KeyScheme`] — deterministic content/index key derivation.

use muninn::{KeyScheme, ServiceIdentity};
use serde::Serialize;
use serde_json::json;

fn scheme() -> KeyScheme {
    KeyScheme::new(ServiceIdentity::new("scorer", "dep-7", "v3"))
}

// =========================================================================
// Content keys
// =========================================================================

#[test]
fn content_key_is_deterministic() {
    let k1 = scheme().content_key(&json!({"x": 1})).unwrap();
    let k2 = scheme().content_key(&json!({"x": 1})).unwrap();
    assert_eq!(k1, k2);
}

#[test]
fn content_key_ignores_map_insertion_order() {
    // Semantically identical requests built in different orders must
    // hash identically.
    let mut forward = serde_json::Map::new();
    forward.insert("a".into(), json!(1));
    forward.insert("b".into(), json!([1, 2]));

    let mut backward = serde_json::Map::new();
    backward.insert("b".into(), json!([1, 2]));
    backward.insert("a".into(), json!(1));

    let k1 = scheme()
        .content_key(&serde_json::Value::Object(forward))
        .unwrap();
    let k2 = scheme()
        .content_key(&serde_json::Value::Object(backward))
        .unwrap();
    assert_eq!(k1, k2);
}

#[test]
fn content_key_matches_equivalent_struct_and_value() {
    #[derive(Serialize)]
    struct Request {
        x: i64,
        label: String,
    }

    let typed = scheme()
        .content_key(&Request {
            x: 1,
            label: "a".into(),
        })
        .unwrap();
    let dynamic = scheme().content_key(&json!({"label": "a", "x": 1})).unwrap();
    assert_eq!(typed, dynamic);
}

#[test]
fn content_key_differs_on_content() {
    let k1 = scheme().content_key(&json!({"x": 1})).unwrap();
    let k2 = scheme().content_key(&json!({"x": 2})).unwrap();
    assert_ne!(k1, k2);
}

#[test]
fn content_key_differs_across_deployments() {
    // Namespacing prevents cross-deployment/version collisions in a
    // shared store.
    let other_dep = KeyScheme::new(ServiceIdentity::new("scorer", "dep-8", "v3"));
    let other_ver = KeyScheme::new(ServiceIdentity::new("scorer", "dep-7", "v4"));

    let base = scheme().content_key(&json!({"x": 1})).unwrap();
    assert_ne!(base, other_dep.content_key(&json!({"x": 1})).unwrap());
    assert_ne!(base, other_ver.content_key(&json!({"x": 1})).unwrap());
}

#[test]
fn content_key_wire_format_is_exact() {
    // The format is depended on by external inspection tooling.
    let key = scheme().content_key(&json!({"x": 1})).unwrap();
    let digest = key.strip_prefix("scorer:dep-7:v3:request:").unwrap();
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(!digest.chars().any(|c| c.is_ascii_uppercase()));
}

// =========================================================================
// Index keys
// =========================================================================

#[test]
fn index_key_wire_format_is_exact() {
    assert_eq!(
        scheme().index_key("req-42"),
        "scorer:dep-7:v3:puid:req-42"
    );
}

#[test]
fn index_key_preserves_correlation_id_verbatim() {
    assert_eq!(
        scheme().index_key("a-b.c_d"),
        "scorer:dep-7:v3:puid:a-b.c_d"
    );
}

// =========================================================================
// Diagnostic pattern
// =========================================================================

#[test]
fn content_pattern_matches_content_keys_only() {
    let pattern = scheme().content_key_pattern();
    assert_eq!(pattern, "scorer:dep-7:v3:request:*");

    let content_key = scheme().content_key(&json!({"x": 1})).unwrap();
    let prefix = pattern.strip_suffix('*').unwrap();
    assert!(content_key.starts_with(prefix));
    assert!(!scheme().index_key("req-42").starts_with(prefix));
}
