//! Redis Cache Backend Tests
//!
//! Note: tests marked `#[ignore]` require a Redis server on localhost:6379.

use cachet_domain::value_objects::{RedisClusterConfig, RedisConfig, RemoteTimeouts};
use cachet_domain::{Cache, CacheBackend, Error};
use cachet_providers::cache::{RedisBackend, RedisClusterNodes, RedisConnector, RedisNode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn local_backend() -> RedisBackend<RedisNode> {
    let config = RedisConfig::new("localhost:6379").with_defaults();
    RedisBackend::new(RedisNode::new(&config).unwrap(), config.timeouts())
}

fn unique(name: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("cachet-test:{name}:{nanos}")
}

#[test]
fn test_redis_node_creation() {
    let node = RedisNode::new(&RedisConfig::new("localhost:6379")).unwrap();
    assert_eq!(node.addr(), "localhost:6379");
    assert_eq!(node.pool_size(), 10);
    assert_eq!(node.name(), "redis");

    let zero_pool = RedisConfig {
        pool_size: 0,
        ..RedisConfig::new("localhost:6379")
    };
    assert_eq!(RedisNode::new(&zero_pool).unwrap().pool_size(), 1);
}

#[test]
fn test_redis_connectors_accept_pool_tuning() {
    let node = RedisConfig {
        min_idle_conns: Some(2),
        conn_max_lifetime_secs: Some(3600),
        ..RedisConfig::new("localhost:6379")
    };
    assert_eq!(RedisNode::new(&node).unwrap().pool_size(), 10);

    let cluster = RedisClusterConfig {
        pool_size: Some(20),
        max_idle_conns: Some(8),
        ..RedisClusterConfig::new(["10.0.0.1:7000"])
    };
    assert!(RedisClusterNodes::new(&cluster).is_ok());
}

#[test]
fn test_redis_node_invalid_url() {
    assert!(matches!(
        RedisNode::new(&RedisConfig::new("localhost:not-a-port")),
        Err(Error::Config { .. })
    ));
}

#[test]
fn test_redis_node_url_with_config_password() {
    let config = RedisConfig {
        password: Some("secret".to_string()),
        db: 2,
        ..RedisConfig::new("redis://localhost:6379")
    };
    assert!(RedisNode::new(&config).is_ok());

    let conflicting = RedisConfig {
        password: Some("other".to_string()),
        ..RedisConfig::new("redis://:secret@localhost:6379")
    };
    assert!(matches!(
        RedisNode::new(&conflicting),
        Err(Error::Config { .. })
    ));
}

#[test]
fn test_redis_cluster_password_applies_to_url_seeds() {
    let config = RedisClusterConfig::new(["redis://10.0.0.1:7000", "10.0.0.2:7000"])
        .with_password("secret");
    assert!(RedisClusterNodes::new(&config).is_ok());

    let conflicting = RedisClusterConfig::new(["redis://:one@10.0.0.1:7000"]).with_password("two");
    assert!(matches!(
        RedisClusterNodes::new(&conflicting),
        Err(Error::Config { .. })
    ));
}

#[tokio::test]
async fn test_redis_unreachable_server_is_backend_error() {
    let config = RedisConfig {
        dial_timeout_ms: 200,
        ..RedisConfig::new("127.0.0.1:1")
    };
    let backend = RedisBackend::new(RedisNode::new(&config).unwrap(), config.timeouts());

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
async fn test_redis_closed_backend_rejects_calls() {
    let backend = local_backend();
    backend.close().await.unwrap();
    backend.close().await.unwrap();

    assert!(backend.get("k").await.unwrap_err().is_backend_error());
}

#[tokio::test]
async fn test_redis_empty_batches_skip_the_server() {
    let config = RedisConfig::new("127.0.0.1:1");
    let backend = RedisBackend::new(
        RedisNode::new(&config).unwrap(),
        RemoteTimeouts::default(),
    );

    assert!(backend.multi_get(&[]).await.unwrap().is_empty());
    backend.multi_set(&[], Duration::ZERO).await.unwrap();
    backend.delete(&[]).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Redis server"]
async fn test_redis_backend_basic_operations() {
    let backend = local_backend();
    let key = unique("basic");

    backend
        .set(&key, b"payload", Duration::from_secs(60))
        .await
        .unwrap();
    assert_eq!(backend.get(&key).await.unwrap(), Some(b"payload".to_vec()));

    backend.delete(std::slice::from_ref(&key)).await.unwrap();
    assert!(backend.get(&key).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a Redis server"]
async fn test_redis_backend_batch_with_ttl() {
    let backend = local_backend();
    let a = unique("a");
    let b = unique("b");
    let missing = unique("missing");

    backend
        .multi_set(
            &[(a.clone(), b"1".to_vec()), (b.clone(), b"2".to_vec())],
            Duration::from_millis(300),
        )
        .await
        .unwrap();
    let values = backend
        .multi_get(&[a.clone(), missing, b.clone()])
        .await
        .unwrap();
    assert_eq!(values, vec![Some(b"1".to_vec()), None, Some(b"2".to_vec())]);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(backend.get(&a).await.unwrap().is_none());
    assert!(backend.get(&b).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a Redis server"]
async fn test_redis_zero_ttl_persists() {
    let backend = local_backend();
    let key = unique("persist");

    backend.set(&key, b"v", Duration::ZERO).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(backend.get(&key).await.unwrap(), Some(b"v".to_vec()));

    backend.delete(std::slice::from_ref(&key)).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Redis server"]
async fn test_redis_backend_through_cache_contract() {
    let prefix = unique("contract");
    let cache = Cache::new(Arc::new(local_backend())).with_key_prefix(prefix.clone());

    cache
        .set("u:1", &"Alice".to_string(), Duration::from_secs(60))
        .await
        .unwrap();
    cache.set_not_found("u:2").await.unwrap();

    assert_eq!(cache.get::<String>("u:1").await.unwrap(), "Alice");
    assert!(cache.get::<String>("u:2").await.unwrap_err().is_placeholder());
    assert!(cache.get::<String>("u:3").await.unwrap_err().is_miss());

    let mut found: HashMap<String, String> = HashMap::new();
    cache
        .multi_get(&["u:1", "u:2", "u:3"], &mut found)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[&format!("{prefix}:u:1")], "Alice");

    cache.del(&["u:1", "u:2"]).await.unwrap();
    assert!(cache.get::<String>("u:1").await.unwrap_err().is_miss());
}
