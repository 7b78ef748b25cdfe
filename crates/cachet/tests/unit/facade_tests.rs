//! Facade Re-export Tests

use cachet::{
    Cache, CacheConfig, CacheManager, CacheType, Error, NOT_FOUND_PLACEHOLDER, build_cache_key,
    global_cache, setup_global_cache, shutdown_global_cache,
};
use std::time::Duration;

#[test]
fn test_key_builder_reexported() {
    assert_eq!(build_cache_key("app", "u:1").unwrap(), "app:u:1");
    assert!(matches!(build_cache_key("app", ""), Err(Error::EmptyKey)));
    assert_eq!(NOT_FOUND_PLACEHOLDER, "*");
}

#[tokio::test]
async fn test_manager_through_facade() {
    let manager = CacheManager::new();
    manager
        .add_from_config("sessions", CacheConfig::memory().with_key_prefix("s"))
        .unwrap();

    let cache: Cache = manager.cache("sessions").unwrap();
    cache
        .set("token", &"abc".to_string(), Duration::from_secs(60))
        .await
        .unwrap();
    assert_eq!(cache.get::<String>("token").await.unwrap(), "abc");

    manager.close_all().await.unwrap();
    assert!(manager.is_empty());
}

#[tokio::test]
async fn test_global_cache_through_facade() {
    setup_global_cache(CacheConfig::memory().with_key_prefix("global"))
        .await
        .unwrap();
    let cache = global_cache().unwrap();
    assert_eq!(cache.key_prefix(), "global");
    assert_eq!(CacheType::default(), CacheType::Memory);

    shutdown_global_cache().await.unwrap();
}
