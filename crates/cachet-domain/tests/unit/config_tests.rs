//! Configuration value object tests

use cachet_domain::constants::*;
use cachet_domain::error::Error;
use cachet_domain::value_objects::{
    CacheConfig, CacheType, MemoryConfig, RedisClusterConfig, RedisConfig,
};
use std::time::Duration;

#[test]
fn test_default_config_is_memory() {
    let config = CacheConfig::default();
    assert_eq!(config.cache_type, CacheType::Memory);
    assert_eq!(config.key_prefix, "");
    assert_eq!(config.default_ttl(), DEFAULT_EXPIRE_TIME);
    assert_eq!(config.not_found_ttl(), DEFAULT_NOT_FOUND_EXPIRE_TIME);
    assert_eq!(config.codec.as_deref(), Some(JSON_CODEC_NAME));
    assert!(config.validate().is_ok());
}

#[test]
fn test_cache_type_names() {
    assert_eq!(CacheType::Memory.as_str(), "memory");
    assert_eq!(CacheType::Redis.as_str(), "redis");
    assert_eq!(CacheType::RedisCluster.to_string(), "redis_cluster");
}

#[test]
fn test_zero_tunables_get_defaults() {
    let config = CacheConfig {
        default_ttl_secs: 0,
        not_found_ttl_secs: 0,
        memory: Some(MemoryConfig {
            max_cost: 0,
            initial_capacity: 0,
        }),
        ..CacheConfig::default()
    }
    .with_defaults();

    assert_eq!(config.default_ttl(), DEFAULT_EXPIRE_TIME);
    assert_eq!(config.not_found_ttl(), DEFAULT_NOT_FOUND_EXPIRE_TIME);
    assert_eq!(config.memory, Some(MemoryConfig::default()));
}

#[test]
fn test_missing_memory_block_is_filled() {
    let config = CacheConfig {
        memory: None,
        ..CacheConfig::default()
    }
    .with_defaults();
    assert_eq!(config.memory, Some(MemoryConfig::default()));
}

#[test]
fn test_redis_defaults_fill_zero_values() {
    let config = CacheConfig {
        redis: Some(RedisConfig {
            addr: "localhost:6379".to_string(),
            pool_size: 0,
            dial_timeout_ms: 0,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            ..RedisConfig::default()
        }),
        ..CacheConfig::redis("unused")
    }
    .with_defaults();

    let redis = config.redis.unwrap();
    assert_eq!(redis.pool_size, REDIS_DEFAULT_POOL_SIZE);
    let timeouts = redis.timeouts();
    assert_eq!(timeouts.dial, Duration::from_secs(5));
    assert_eq!(timeouts.read, Duration::from_secs(3));
    assert_eq!(timeouts.write, Duration::from_secs(3));
}

#[test]
fn test_redis_without_block_is_config_error() {
    let config = CacheConfig {
        cache_type: CacheType::Redis,
        ..CacheConfig::default()
    }
    .with_defaults();

    assert!(config.redis.is_none());
    assert!(matches!(config.validate(), Err(Error::Config { .. })));
}

#[test]
fn test_redis_empty_addr_is_config_error() {
    assert!(matches!(
        CacheConfig::redis("").validate(),
        Err(Error::Config { .. })
    ));
    assert!(CacheConfig::redis("localhost:6379").validate().is_ok());
}

#[test]
fn test_cluster_address_validation() {
    let empty: [&str; 0] = [];
    assert!(CacheConfig::redis_cluster(empty).validate().is_err());
    assert!(
        CacheConfig::redis_cluster(["10.0.0.1:7000", " "])
            .validate()
            .is_err()
    );
    assert!(
        CacheConfig::redis_cluster(["10.0.0.1:7000", "10.0.0.2:7000"])
            .validate()
            .is_ok()
    );
}

#[test]
fn test_cluster_defaults_fill_zero_values() {
    let config = CacheConfig {
        redis_cluster: Some(RedisClusterConfig {
            addrs: vec!["10.0.0.1:7000".to_string()],
            read_timeout_ms: 0,
            ..RedisClusterConfig::default()
        }),
        ..CacheConfig::redis_cluster(["unused"])
    }
    .with_defaults();

    let cluster = config.redis_cluster.unwrap();
    assert_eq!(cluster.read_timeout_ms, REDIS_DEFAULT_READ_TIMEOUT_MS);
}

#[test]
fn test_builder_helpers() {
    let config = CacheConfig::memory()
        .with_key_prefix("app")
        .with_codec(None::<String>)
        .with_default_ttl(Duration::from_secs(600))
        .with_not_found_ttl(Duration::from_secs(60));

    assert_eq!(config.key_prefix, "app");
    assert!(config.codec.is_none());
    assert_eq!(config.default_ttl_secs, 600);
    assert_eq!(config.not_found_ttl_secs, 60);
}

#[test]
fn test_config_deserializes_type_field() {
    let config: CacheConfig = serde_json::from_str(
        r#"{"type": "redis", "key_prefix": "app", "redis": {"addr": "localhost:6379"}}"#,
    )
    .unwrap();

    assert_eq!(config.cache_type, CacheType::Redis);
    assert_eq!(config.key_prefix, "app");
    let redis = config.redis.unwrap();
    assert_eq!(redis.addr, "localhost:6379");
    assert_eq!(redis.pool_size, REDIS_DEFAULT_POOL_SIZE);
}

#[test]
fn test_unset_pool_tuning_is_not_reported() {
    assert!(RedisConfig::new("localhost:6379")
        .unapplied_pool_settings()
        .is_empty());
    assert!(RedisClusterConfig::new(["10.0.0.1:7000"])
        .unapplied_pool_settings()
        .is_empty());

    let redis: RedisConfig =
        serde_json::from_str(r#"{"addr": "localhost:6379", "max_idle_conns": 4}"#).unwrap();
    assert_eq!(redis.max_idle_conns, Some(4));
    assert_eq!(redis.unapplied_pool_settings(), vec!["max_idle_conns"]);

    let rendered = serde_json::to_value(RedisClusterConfig::default()).unwrap();
    assert!(rendered.get("pool_size").is_none());
}
