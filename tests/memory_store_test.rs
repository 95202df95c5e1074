//! Tests for [`MemoryStore`] — the in-process TTL store implementation.

use std::time::Duration;

use muninn::{MemoryStore, Store};

const TTL: Duration = Duration::from_secs(60);

// =========================================================================
// Single-key operations
// =========================================================================

#[tokio::test]
async fn set_then_get() {
    let store = MemoryStore::new();
    store.set("k", "v", TTL).await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
}

#[tokio::test]
async fn get_absent_key() {
    let store = MemoryStore::new();
    assert_eq!(store.get("nope").await.unwrap(), None);
}

#[tokio::test]
async fn set_overwrites() {
    let store = MemoryStore::new();
    store.set("k", "v1", TTL).await.unwrap();
    store.set("k", "v2", TTL).await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));
}

// =========================================================================
// Batch operations
// =========================================================================

#[tokio::test]
async fn mget_preserves_order_with_gaps() {
    let store = MemoryStore::new();
    store.set("a", "1", TTL).await.unwrap();
    store.set("c", "3", TTL).await.unwrap();

    let values = store
        .mget(&["a".into(), "b".into(), "c".into()])
        .await
        .unwrap();
    assert_eq!(
        values,
        vec![Some("1".to_string()), None, Some("3".to_string())]
    );
}

#[tokio::test]
async fn mset_then_expire_assigns_ttl() {
    let store = MemoryStore::new();
    store
        .mset(&[("a".into(), "1".into()), ("b".into(), "2".into())])
        .await
        .unwrap();

    // mset carries no TTL; both keys must exist and accept one.
    assert!(store.expire("a", Duration::from_millis(50)).await.unwrap());
    assert!(store.expire("b", TTL).await.unwrap());

    tokio::time::sleep(Duration::from_millis(120)).await;

    assert_eq!(store.get("a").await.unwrap(), None);
    assert_eq!(store.get("b").await.unwrap(), Some("2".to_string()));
}

// =========================================================================
// Expiry
// =========================================================================

#[tokio::test]
async fn entries_expire_after_ttl() {
    let store = MemoryStore::new();
    store.set("k", "v", Duration::from_millis(50)).await.unwrap();

    assert!(store.get("k").await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(120)).await;

    assert_eq!(store.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn reads_slide_the_window() {
    let store = MemoryStore::new();
    store.set("k", "v", Duration::from_millis(300)).await.unwrap();

    // Keep touching the key at intervals shorter than the TTL; it must
    // survive well past the original deadline.
    for _ in 0..4 {
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(store.get("k").await.unwrap().is_some());
    }

    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(store.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn expire_refreshes_deadline() {
    let store = MemoryStore::new();
    store.set("k", "v", Duration::from_millis(150)).await.unwrap();

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(store.expire("k", Duration::from_millis(300)).await.unwrap());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(store.get("k").await.unwrap().is_some());
}

#[tokio::test]
async fn expire_absent_key_reports_false() {
    let store = MemoryStore::new();
    assert!(!store.expire("nope", TTL).await.unwrap());
}

// =========================================================================
// Key listing
// =========================================================================

#[tokio::test]
async fn keys_prefix_glob() {
    let store = MemoryStore::new();
    store.set("svc:request:aa", "1", TTL).await.unwrap();
    store.set("svc:request:bb", "2", TTL).await.unwrap();
    store.set("svc:puid:req-1", "3", TTL).await.unwrap();

    let mut keys = store.keys("svc:request:*").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["svc:request:aa", "svc:request:bb"]);
}

#[tokio::test]
async fn keys_exact_match() {
    let store = MemoryStore::new();
    store.set("svc:request:aa", "1", TTL).await.unwrap();

    assert_eq!(
        store.keys("svc:request:aa").await.unwrap(),
        vec!["svc:request:aa"]
    );
    assert!(store.keys("svc:request:zz").await.unwrap().is_empty());
}
