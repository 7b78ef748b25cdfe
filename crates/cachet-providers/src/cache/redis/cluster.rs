//! Cluster connector

use super::{RedisConnector, connection_info};
use crate::constants::REDIS_CLUSTER_BACKEND_NAME;
use async_trait::async_trait;
use cachet_domain::error::{Error, Result};
use cachet_domain::value_objects::RedisClusterConfig;
use redis::cluster::ClusterClient;
use redis::cluster_async::ClusterConnection;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Connector for a Redis cluster
///
/// Holds one cluster connection, dialed on first use. It discovers the slot
/// layout from the seed nodes and routes each command to the owning node.
pub struct RedisClusterNodes {
    client: ClusterClient,
    addrs: Vec<String>,
    dial_timeout: Duration,
    connection: Mutex<Option<ClusterConnection>>,
}

impl RedisClusterNodes {
    /// Create a connector; no connection is opened until first use
    ///
    /// # Errors
    /// * [`Error::Config`] when the seed addresses are empty or invalid
    pub fn new(config: &RedisClusterConfig) -> Result<Self> {
        if config.addrs.is_empty() {
            return Err(Error::config("Redis cluster address list cannot be empty"));
        }

        let nodes = config
            .addrs
            .iter()
            .map(|addr| connection_info(addr, config.password.as_deref(), None))
            .collect::<Result<Vec<_>>>()?;

        let client = ClusterClient::builder(nodes).build().map_err(|e| {
            Error::config_with_source(format!("Invalid Redis cluster addresses: {e}"), e)
        })?;

        let unapplied = config.unapplied_pool_settings();
        if !unapplied.is_empty() {
            warn!(
                settings = ?unapplied,
                "Pool tuning settings are ignored for multiplexed connections"
            );
        }

        Ok(Self {
            client,
            addrs: config.addrs.clone(),
            dial_timeout: config.timeouts().dial,
            connection: Mutex::new(None),
        })
    }

    /// Seed addresses as configured
    pub fn addrs(&self) -> &[String] {
        &self.addrs
    }
}

#[async_trait]
impl RedisConnector for RedisClusterNodes {
    type Connection = ClusterConnection;

    async fn connect(&self) -> Result<ClusterConnection> {
        let mut connection = self.connection.lock().await;
        if let Some(conn) = connection.as_ref() {
            return Ok(conn.clone());
        }

        let seeds = self.addrs.join(",");
        let conn = match tokio::time::timeout(self.dial_timeout, self.client.get_async_connection())
            .await
        {
            Ok(Ok(conn)) => conn,
            Ok(Err(e)) => {
                return Err(Error::backend_read_with_source(
                    seeds,
                    format!("Failed to connect to Redis cluster: {e}"),
                    e,
                ));
            }
            Err(_) => {
                return Err(Error::backend_read(
                    seeds,
                    format!("Redis cluster connection timed out after {:?}", self.dial_timeout),
                ));
            }
        };

        debug!(seeds = %seeds, "redis cluster connection opened");
        *connection = Some(conn.clone());
        Ok(conn)
    }

    async fn release(&self) -> Result<()> {
        self.connection.lock().await.take();
        Ok(())
    }

    fn name(&self) -> &'static str {
        REDIS_CLUSTER_BACKEND_NAME
    }
}

impl std::fmt::Debug for RedisClusterNodes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClusterNodes")
            .field("addrs", &self.addrs)
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

/// Factory function for creating Redis cluster backends
fn redis_cluster_backend_factory(config: &CacheConfig) -> Result<Arc<dyn CacheBackend>> {
    let cluster = config
        .redis_cluster
        .as_ref()
        .ok_or_else(|| Error::config("Redis cluster configuration cannot be empty"))?;

    let nodes = RedisClusterNodes::new(cluster)?;
    Ok(Arc::new(RedisBackend::new(nodes, cluster.timeouts())))
}

#[linkme::distributed_slice(CACHE_BACKENDS)]
static REDIS_CLUSTER_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: "redis_cluster",
    description: "Redis Cluster distributed cache",
    factory: redis_cluster_backend_factory,
};
