//! Cache Backend Port
//!
//! The minimal byte-level capability surface every storage engine offers.
//! Key prefixing, encoding and the placeholder protocol are handled above
//! this port by [`Cache`](crate::cache::Cache); backends only move bytes.
//!
//! ## Implementations
//!
//! - **Moka**: bounded in-process cache
//! - **Redis**: single-node remote cache
//! - **Redis Cluster**: clustered remote cache

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Byte-level storage engine behind a [`Cache`](crate::cache::Cache)
///
/// All keys passed in are physical keys. A `ttl` of [`Duration::ZERO`]
/// means the entry never expires.
#[async_trait]
pub trait CacheBackend: Send + Sync + std::fmt::Debug {
    /// Read one entry; `None` when the key is absent
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write one entry with its own expiration
    ///
    /// The write must be visible to a subsequent [`get`](Self::get) once
    /// this returns.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Read many entries; the result has one slot per requested key, in order
    async fn multi_get(&self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>>;

    /// Write many entries, all sharing the same expiration
    async fn multi_set(&self, entries: &[(String, Vec<u8>)], ttl: Duration) -> Result<()>;

    /// Remove entries; absent keys are ignored
    async fn delete(&self, keys: &[String]) -> Result<()>;

    /// Release the engine's resources; later calls fail
    async fn close(&self) -> Result<()>;

    /// Identifier of the backend implementation (e.g. "moka", "redis")
    fn backend_name(&self) -> &str;
}
