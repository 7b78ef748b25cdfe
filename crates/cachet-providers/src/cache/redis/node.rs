//! Single-node connector

use super::{RedisConnector, connection_info};
use crate::constants::REDIS_BACKEND_NAME;
use async_trait::async_trait;
use cachet_domain::error::{Error, Result};
use cachet_domain::value_objects::RedisConfig;
use redis::Client;
use redis::aio::ConnectionManager;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Connector for one Redis server
///
/// Keeps `pool_size` multiplexed connections, dialed on first use and handed
/// out round-robin. Each connection reconnects on its own after a failure.
pub struct RedisNode {
    client: Client,
    addr: String,
    dial_timeout: Duration,
    slots: Vec<Mutex<Option<ConnectionManager>>>,
    next: AtomicUsize,
}

impl RedisNode {
    /// Create a connector; no connection is opened until first use
    ///
    /// # Errors
    /// * [`Error::Config`] when the address does not parse, or conflicts
    ///   with the configured password or database
    pub fn new(config: &RedisConfig) -> Result<Self> {
        let info = connection_info(&config.addr, config.password.as_deref(), Some(config.db))?;
        let client = Client::open(info).map_err(|e| {
            Error::config_with_source(format!("Invalid Redis connection settings: {e}"), e)
        })?;

        let unapplied = config.unapplied_pool_settings();
        if !unapplied.is_empty() {
            warn!(
                settings = ?unapplied,
                "Pool tuning settings are ignored for multiplexed connections"
            );
        }

        let pool_size = config.pool_size.max(1);
        Ok(Self {
            client,
            addr: config.addr.clone(),
            dial_timeout: config.timeouts().dial,
            slots: (0..pool_size).map(|_| Mutex::new(None)).collect(),
            next: AtomicUsize::new(0),
        })
    }

    /// Server address as configured
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Number of pooled connections
    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }

    async fn dial(&self) -> Result<ConnectionManager> {
        match tokio::time::timeout(self.dial_timeout, ConnectionManager::new(self.client.clone()))
            .await
        {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(Error::backend_read_with_source(
                &self.addr,
                format!("Failed to connect to Redis: {e}"),
                e,
            )),
            Err(_) => Err(Error::backend_read(
                &self.addr,
                format!("Redis connection timed out after {:?}", self.dial_timeout),
            )),
        }
    }
}

#[async_trait]
impl RedisConnector for RedisNode {
    type Connection = ConnectionManager;

    async fn connect(&self) -> Result<ConnectionManager> {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.slots.len();
        let mut slot = self.slots[index].lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self.dial().await?;
        debug!(addr = %self.addr, slot = index, "redis connection opened");
        *slot = Some(conn.clone());
        Ok(conn)
    }

    async fn release(&self) -> Result<()> {
        for slot in &self.slots {
            slot.lock().await.take();
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        REDIS_BACKEND_NAME
    }
}

impl std::fmt::Debug for RedisNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisNode")
            .field("addr", &self.addr)
            .field("pool_size", &self.slots.len())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use super::RedisBackend;
use cachet_domain::ports::{CACHE_BACKENDS, CacheBackend, CacheBackendEntry};
use cachet_domain::value_objects::CacheConfig;
use std::sync::Arc;

/// Factory function for creating single-node Redis backends
fn redis_backend_factory(config: &CacheConfig) -> Result<Arc<dyn CacheBackend>> {
    let redis = config
        .redis
        .as_ref()
        .ok_or_else(|| Error::config("Redis configuration cannot be empty"))?;

    let node = RedisNode::new(redis)?;
    Ok(Arc::new(RedisBackend::new(node, redis.timeouts())))
}

#[linkme::distributed_slice(CACHE_BACKENDS)]
static REDIS_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: "redis",
    description: "Redis single-node distributed cache",
    factory: redis_backend_factory,
};
