//! Moka in-memory cache backend
//!
//! Bounded, concurrent in-process backend built on Moka.
//!
//! ## Features
//!
//! - Cost-bounded capacity (each entry costs its key plus value length)
//! - Per-entry TTL; a zero TTL never expires
//! - Writes are flushed before returning so they are immediately readable
//!
//! ## Example
//!
//! ```ignore
//! use cachet_domain::MemoryConfig;
//! use cachet_providers::cache::MokaBackend;
//!
//! let backend = MokaBackend::new(MemoryConfig::default());
//! ```

use crate::constants::{BACKEND_CLOSED_MESSAGE, MOKA_BACKEND_NAME};
use async_trait::async_trait;
use cachet_domain::error::{Error, Result};
use cachet_domain::ports::CacheBackend;
use cachet_domain::value_objects::MemoryConfig;
use moka::Expiry;
use moka::future::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

/// Stored value with the TTL it was written with
#[derive(Debug, Clone)]
struct StoredEntry {
    bytes: Vec<u8>,
    ttl: Option<Duration>,
}

impl StoredEntry {
    fn new(bytes: &[u8], ttl: Duration) -> Self {
        Self {
            bytes: bytes.to_vec(),
            ttl: (!ttl.is_zero()).then_some(ttl),
        }
    }
}

/// Expiration policy reading each entry's own TTL
struct EntryExpiry;

impl Expiry<String, StoredEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// Moka-based in-process cache backend
#[derive(Clone)]
pub struct MokaBackend {
    cache: Cache<String, StoredEntry>,
    config: MemoryConfig,
    closed: Arc<AtomicBool>,
}

impl Default for MokaBackend {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

impl MokaBackend {
    /// Create a backend bounded by `config.max_cost`
    pub fn new(config: MemoryConfig) -> Self {
        let config = config.with_defaults();
        let cache = Cache::builder()
            .max_capacity(config.max_cost)
            .initial_capacity(config.initial_capacity)
            .weigher(|key: &String, value: &StoredEntry| -> u32 {
                u32::try_from(key.len() + value.bytes.len()).unwrap_or(u32::MAX)
            })
            .expire_after(EntryExpiry)
            .build();

        Self {
            cache,
            config,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Configured cost budget
    pub fn max_cost(&self) -> u64 {
        self.config.max_cost
    }

    /// Number of live entries, after flushing pending maintenance
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    fn ensure_open_for_read(&self, key: &str) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::backend_read(key, BACKEND_CLOSED_MESSAGE));
        }
        Ok(())
    }

    fn ensure_open_for_write(&self, key: &str) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::backend_write(key, BACKEND_CLOSED_MESSAGE));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheBackend for MokaBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.ensure_open_for_read(key)?;
        Ok(self.cache.get(key).await.map(|entry| entry.bytes))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        self.ensure_open_for_write(key)?;
        self.cache
            .insert(key.to_string(), StoredEntry::new(value, ttl))
            .await;
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            values.push(self.get(key).await?);
        }
        Ok(values)
    }

    async fn multi_set(&self, entries: &[(String, Vec<u8>)], ttl: Duration) -> Result<()> {
        self.ensure_open_for_write(&joined_keys(entries.iter().map(|(k, _)| k)))?;
        for (key, value) in entries {
            self.cache
                .insert(key.clone(), StoredEntry::new(value, ttl))
                .await;
        }
        self.cache.run_pending_tasks().await;
        debug!(count = entries.len(), "moka batch written");
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<()> {
        self.ensure_open_for_write(&joined_keys(keys.iter()))?;
        for key in keys {
            self.cache.invalidate(key).await;
        }
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        debug!("moka backend closed");
        Ok(())
    }

    fn backend_name(&self) -> &str {
        MOKA_BACKEND_NAME
    }
}

impl std::fmt::Debug for MokaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaBackend")
            .field("max_cost", &self.config.max_cost)
            .field("entries", &self.cache.entry_count())
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}

fn joined_keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
    keys.map(String::as_str).collect::<Vec<_>>().join(",")
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use cachet_domain::ports::{CACHE_BACKENDS, CacheBackendEntry};
use cachet_domain::value_objects::CacheConfig;

fn moka_backend_factory(config: &CacheConfig) -> Result<Arc<dyn CacheBackend>> {
    let memory = config.memory.unwrap_or_default();
    Ok(Arc::new(MokaBackend::new(memory)))
}

#[linkme::distributed_slice(CACHE_BACKENDS)]
static MOKA_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: "memory",
    description: "Moka bounded in-process cache",
    factory: moka_backend_factory,
};
