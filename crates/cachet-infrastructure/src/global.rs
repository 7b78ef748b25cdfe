//! Process-wide default cache
//!
//! An explicitly managed default for code that does not carry a [`Cache`]
//! around. [`setup_global_cache`] installs a provider, [`global_cache`]
//! falls back to an in-memory default on first use, and
//! [`shutdown_global_cache`] closes and uninstalls it.
//!
//! ```ignore
//! use cachet_infrastructure::global;
//!
//! global::setup_global_cache(CacheConfig::redis("localhost:6379")).await?;
//! global::set("u:1", &user, Duration::from_secs(600)).await?;
//! let user: User = global::get("u:1").await?;
//! global::shutdown_global_cache().await?;
//! ```

use crate::cache::CacheProvider;
use cachet_domain::Cache;
use cachet_domain::encoding::CacheValue;
use cachet_domain::error::Result;
use cachet_domain::value_objects::CacheConfig;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, info};

static GLOBAL_PROVIDER: RwLock<Option<Arc<CacheProvider>>> = RwLock::new(None);

/// Install a provider built from `config` as the process-wide default
///
/// A previously installed provider is closed after the swap.
pub async fn setup_global_cache(config: CacheConfig) -> Result<()> {
    let provider = Arc::new(CacheProvider::new(config)?);
    let previous = GLOBAL_PROVIDER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(provider);

    if let Some(previous) = previous {
        debug!("Closing previously installed global cache");
        previous.close().await?;
    }
    info!("Global cache installed");
    Ok(())
}

/// The process-wide default cache
///
/// Installs an in-memory cache with default settings when none is set up.
pub fn global_cache() -> Result<Cache> {
    if let Some(provider) = GLOBAL_PROVIDER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return Ok(provider.cache().clone());
    }

    let mut slot = GLOBAL_PROVIDER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(provider) = slot.as_ref() {
        return Ok(provider.cache().clone());
    }

    let provider = Arc::new(CacheProvider::new(CacheConfig::memory())?);
    let cache = provider.cache().clone();
    *slot = Some(provider);
    info!("Default in-memory global cache installed");
    Ok(cache)
}

/// Whether a global cache is currently installed
pub fn is_global_cache_installed() -> bool {
    GLOBAL_PROVIDER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// Close and uninstall the process-wide default cache
///
/// A no-op when nothing is installed.
pub async fn shutdown_global_cache() -> Result<()> {
    let provider = GLOBAL_PROVIDER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();

    if let Some(provider) = provider {
        provider.close().await?;
        info!("Global cache shut down");
    }
    Ok(())
}

/// [`Cache::set`] on the global cache
pub async fn set<T: CacheValue>(key: &str, value: &T, ttl: Duration) -> Result<()> {
    global_cache()?.set(key, value, ttl).await
}

/// [`Cache::get`] on the global cache
pub async fn get<T: CacheValue>(key: &str) -> Result<T> {
    global_cache()?.get(key).await
}

/// [`Cache::multi_set`] on the global cache
pub async fn multi_set<K, T>(values: &HashMap<K, T>, ttl: Duration) -> Result<()>
where
    K: AsRef<str>,
    T: CacheValue,
{
    global_cache()?.multi_set(values, ttl).await
}

/// [`Cache::multi_get`] on the global cache
pub async fn multi_get<K, T>(keys: &[K], values: &mut HashMap<String, T>) -> Result<()>
where
    K: AsRef<str>,
    T: CacheValue,
{
    global_cache()?.multi_get(keys, values).await
}

/// [`Cache::del`] on the global cache
pub async fn del<K: AsRef<str>>(keys: &[K]) -> Result<()> {
    global_cache()?.del(keys).await
}

/// [`Cache::set_not_found`] on the global cache
pub async fn set_not_found(key: &str) -> Result<()> {
    global_cache()?.set_not_found(key).await
}
