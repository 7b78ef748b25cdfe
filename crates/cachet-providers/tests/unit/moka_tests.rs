//! Moka Cache Backend Tests

use cachet_domain::{Cache, CacheBackend, CacheValue, MemoryConfig};
use cachet_providers::cache::MokaBackend;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct TestValue {
    data: String,
    number: i32,
}

impl CacheValue for TestValue {}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn test_moka_backend_basic_operations() {
    let backend = MokaBackend::default();

    backend
        .set("test_key", b"payload", Duration::from_secs(60))
        .await
        .unwrap();
    assert_eq!(
        backend.get("test_key").await.unwrap(),
        Some(b"payload".to_vec())
    );

    backend.delete(&keys(&["test_key"])).await.unwrap();
    assert!(backend.get("test_key").await.unwrap().is_none());
}

#[tokio::test]
async fn test_moka_backend_nonexistent_key() {
    let backend = MokaBackend::default();

    assert!(backend.get("nonexistent").await.unwrap().is_none());
    backend.delete(&keys(&["nonexistent"])).await.unwrap();
}

#[tokio::test]
async fn test_moka_backend_entry_expires() {
    let backend = MokaBackend::default();

    backend
        .set("short", b"v", Duration::from_millis(50))
        .await
        .unwrap();
    backend.set("forever", b"v", Duration::ZERO).await.unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(backend.get("short").await.unwrap().is_none());
    assert_eq!(backend.get("forever").await.unwrap(), Some(b"v".to_vec()));
}

#[tokio::test]
async fn test_moka_backend_overwrite_resets_ttl() {
    let backend = MokaBackend::default();

    backend
        .set("k", b"old", Duration::from_millis(50))
        .await
        .unwrap();
    backend.set("k", b"new", Duration::ZERO).await.unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(backend.get("k").await.unwrap(), Some(b"new".to_vec()));
}

#[tokio::test]
async fn test_moka_backend_batch_operations() {
    let backend = MokaBackend::default();
    let entries = vec![
        ("a".to_string(), b"1".to_vec()),
        ("b".to_string(), b"2".to_vec()),
    ];

    backend
        .multi_set(&entries, Duration::from_secs(60))
        .await
        .unwrap();
    let values = backend.multi_get(&keys(&["a", "missing", "b"])).await.unwrap();

    assert_eq!(
        values,
        vec![Some(b"1".to_vec()), None, Some(b"2".to_vec())]
    );
    assert_eq!(backend.entry_count().await, 2);
}

#[tokio::test]
async fn test_moka_backend_delete_removes_every_key() {
    let backend = MokaBackend::default();
    for key in ["a", "b", "c"] {
        backend
            .set(key, b"v", Duration::from_secs(60))
            .await
            .unwrap();
    }

    backend.delete(&keys(&["a", "b", "c"])).await.unwrap();

    assert_eq!(backend.entry_count().await, 0);
}

#[tokio::test]
async fn test_moka_backend_cost_bound_evicts() {
    let backend = MokaBackend::new(MemoryConfig {
        max_cost: 64,
        initial_capacity: 16,
    });

    for i in 0..32 {
        backend
            .set(&format!("key-{i}"), &[0u8; 16], Duration::ZERO)
            .await
            .unwrap();
    }

    assert!(backend.entry_count().await < 32);
    assert_eq!(backend.max_cost(), 64);
}

#[tokio::test]
async fn test_moka_backend_rejects_calls_after_close() {
    let backend = MokaBackend::default();
    backend
        .set("k", b"v", Duration::from_secs(60))
        .await
        .unwrap();

    backend.close().await.unwrap();
    backend.close().await.unwrap();

    assert!(backend.get("k").await.unwrap_err().is_backend_error());
    assert!(
        backend
            .set("k", b"v", Duration::ZERO)
            .await
            .unwrap_err()
            .is_backend_error()
    );
}

#[tokio::test]
async fn test_moka_backend_through_cache_contract() {
    let cache = Cache::new(Arc::new(MokaBackend::default()))
        .with_key_prefix("app")
        .with_not_found_ttl(Duration::from_secs(30));
    let value = TestValue {
        data: "test data".to_string(),
        number: 42,
    };

    cache
        .set("u:1", &value, Duration::from_secs(600))
        .await
        .unwrap();
    cache.set_not_found("u:2").await.unwrap();

    assert_eq!(cache.get::<TestValue>("u:1").await.unwrap(), value);
    assert!(cache.get::<TestValue>("u:2").await.unwrap_err().is_placeholder());
    assert!(cache.get::<TestValue>("missing").await.unwrap_err().is_miss());

    let mut found = HashMap::new();
    cache
        .multi_get::<_, TestValue>(&["u:1", "u:2", "u:3"], &mut found)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found["app:u:1"], value);

    cache.del(&["u:1", "u:2"]).await.unwrap();
    assert!(cache.get::<TestValue>("u:1").await.unwrap_err().is_miss());
    assert!(cache.get::<TestValue>("u:2").await.unwrap_err().is_miss());
    assert_eq!(cache.backend_name(), "moka");
}
