//! Redis distributed cache backend
//!
//! One adapter serves both remote topologies. [`RedisBackend`] issues the
//! commands; a [`RedisConnector`] decides where connections come from:
//!
//! - [`RedisNode`]: a single server, through a small round-robin pool of
//!   auto-reconnecting connections
//! - [`RedisClusterNodes`]: a cluster, through one slot-routing connection
//!
//! ## Commands
//!
//! | Operation | Command |
//! |-----------|---------|
//! | `get` | `GET` |
//! | `set` | `SET key value [PX ttl]` |
//! | `multi_get` | `MGET` |
//! | `multi_set` | pipeline of `MSET` and one `PEXPIRE` per key |
//! | `delete` | `DEL` |
//!
//! A zero TTL sends no expiration, so the entry persists.
//!
//! ## Example
//!
//! ```ignore
//! use cachet_domain::RedisConfig;
//! use cachet_providers::cache::{RedisBackend, RedisNode};
//!
//! let config = RedisConfig::new("localhost:6379");
//! let backend = RedisBackend::new(RedisNode::new(&config)?, config.timeouts());
//! ```

mod cluster;
mod node;

pub use cluster::RedisClusterNodes;
pub use node::RedisNode;

use crate::constants::{BACKEND_CLOSED_MESSAGE, REDIS_TLS_URL_SCHEME, REDIS_URL_SCHEME};
use async_trait::async_trait;
use cachet_domain::error::{Error, Result};
use cachet_domain::ports::CacheBackend;
use cachet_domain::value_objects::RemoteTimeouts;
use redis::aio::ConnectionLike;
use redis::{ConnectionInfo, IntoConnectionInfo, RedisResult};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// Source of connections for a [`RedisBackend`]
#[async_trait]
pub trait RedisConnector: Send + Sync + std::fmt::Debug + 'static {
    /// Connection handed to each command
    type Connection: ConnectionLike + Send;

    /// Get a usable connection, dialing if needed
    async fn connect(&self) -> Result<Self::Connection>;

    /// Drop every open connection
    async fn release(&self) -> Result<()>;

    /// Implementation name reported by the backend
    fn name(&self) -> &'static str;
}

/// Redis cache backend
pub struct RedisBackend<C: RedisConnector> {
    connector: C,
    timeouts: RemoteTimeouts,
    closed: AtomicBool,
}

impl<C: RedisConnector> RedisBackend<C> {
    /// Create a backend over `connector`
    pub fn new(connector: C, timeouts: RemoteTimeouts) -> Self {
        Self {
            connector,
            timeouts,
            closed: AtomicBool::new(false),
        }
    }

    /// Configured timeouts
    pub fn timeouts(&self) -> RemoteTimeouts {
        self.timeouts
    }

    /// Get a connection for reading, bounded by the dial timeout
    async fn read_connection(&self, key: &str) -> Result<C::Connection> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::backend_read(key, BACKEND_CLOSED_MESSAGE));
        }
        self.connector.connect().await
    }

    /// Get a connection for writing, bounded by the dial timeout
    async fn write_connection(&self, key: &str) -> Result<C::Connection> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::backend_write(key, BACKEND_CLOSED_MESSAGE));
        }
        self.connector.connect().await.map_err(|e| match e {
            Error::BackendRead {
                key,
                message,
                source,
            } => Error::BackendWrite {
                key,
                message,
                source,
            },
            other => other,
        })
    }

    async fn run_read<T, F>(&self, key: &str, command: &str, call: F) -> Result<T>
    where
        F: Future<Output = RedisResult<T>> + Send,
    {
        match tokio::time::timeout(self.timeouts.read, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(Error::backend_read_with_source(
                key,
                format!("Redis {command} failed: {e}"),
                e,
            )),
            Err(_) => Err(Error::backend_read(
                key,
                format!("Redis {command} timed out after {:?}", self.timeouts.read),
            )),
        }
    }

    async fn run_write<T, F>(&self, key: &str, command: &str, call: F) -> Result<T>
    where
        F: Future<Output = RedisResult<T>> + Send,
    {
        match tokio::time::timeout(self.timeouts.write, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(Error::backend_write_with_source(
                key,
                format!("Redis {command} failed: {e}"),
                e,
            )),
            Err(_) => Err(Error::backend_write(
                key,
                format!("Redis {command} timed out after {:?}", self.timeouts.write),
            )),
        }
    }
}

#[async_trait]
impl<C: RedisConnector> CacheBackend for RedisBackend<C> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.read_connection(key).await?;
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        self.run_read(key, "GET", cmd.query_async(&mut conn)).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let mut conn = self.write_connection(key).await?;
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if !ttl.is_zero() {
            cmd.arg("PX").arg(ttl_millis(ttl));
        }
        self.run_write(key, "SET", cmd.query_async::<()>(&mut conn))
            .await
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let joined = keys.join(",");
        let mut conn = self.read_connection(&joined).await?;
        let mut cmd = redis::cmd("MGET");
        cmd.arg(keys);
        self.run_read(&joined, "MGET", cmd.query_async(&mut conn))
            .await
    }

    async fn multi_set(&self, entries: &[(String, Vec<u8>)], ttl: Duration) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let joined = entries
            .iter()
            .map(|(key, _)| key.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let mut conn = self.write_connection(&joined).await?;

        let mut pipe = redis::pipe();
        pipe.cmd("MSET");
        for (key, value) in entries {
            pipe.arg(key).arg(value);
        }
        pipe.ignore();
        if !ttl.is_zero() {
            let millis = ttl_millis(ttl);
            for (key, _) in entries {
                pipe.cmd("PEXPIRE").arg(key).arg(millis).ignore();
            }
        }

        self.run_write(&joined, "MSET", pipe.query_async::<()>(&mut conn))
            .await?;
        debug!(count = entries.len(), backend = self.connector.name(), "redis batch written");
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let joined = keys.join(",");
        let mut conn = self.write_connection(&joined).await?;
        let mut cmd = redis::cmd("DEL");
        cmd.arg(keys);
        self.run_write(&joined, "DEL", cmd.query_async::<()>(&mut conn))
            .await
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.connector.release().await?;
        debug!(backend = self.connector.name(), "redis backend closed");
        Ok(())
    }

    fn backend_name(&self) -> &str {
        self.connector.name()
    }
}

impl<C: RedisConnector> std::fmt::Debug for RedisBackend<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("connector", &self.connector)
            .field("timeouts", &self.timeouts)
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}

/// TTL in whole milliseconds, never rounded down to zero
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

/// Connection settings for `addr`, with the configured credentials applied
///
/// `addr` is either `host:port` or a full `redis://` / `rediss://` URL. A
/// password or database given both in the URL and in the configuration
/// must agree.
///
/// # Errors
/// * [`Error::Config`] when `addr` does not parse or conflicts with the
///   configured password or database
pub(crate) fn connection_info(
    addr: &str,
    password: Option<&str>,
    db: Option<i64>,
) -> Result<ConnectionInfo> {
    let addr = addr.trim();
    let shown = redact_userinfo(addr);
    let info = if addr.starts_with(REDIS_URL_SCHEME) || addr.starts_with(REDIS_TLS_URL_SCHEME) {
        addr.into_connection_info()
    } else {
        format!("{REDIS_URL_SCHEME}{addr}").as_str().into_connection_info()
    }
    .map_err(|e| Error::config_with_source(format!("Invalid Redis address '{shown}': {e}"), e))?;

    let mut settings = info.redis_settings().clone();
    if let Some(password) = password.filter(|p| !p.is_empty()) {
        if settings.password().is_some_and(|existing| existing != password) {
            return Err(Error::config(format!(
                "Redis password for '{shown}' conflicts with the password in the address"
            )));
        }
        settings = settings.set_password(password);
    }
    if let Some(db) = db.filter(|db| *db != 0) {
        if settings.db() != 0 && settings.db() != db {
            return Err(Error::config(format!(
                "Redis database {db} conflicts with database {} in address '{shown}'",
                settings.db()
            )));
        }
        settings = settings.set_db(db);
    }

    Ok(info.set_redis_settings(settings))
}

/// Address with any `user:password@` part masked, for messages and logs
fn redact_userinfo(addr: &str) -> String {
    match (addr.find("://"), addr.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}***{}", &addr[..scheme_end + 3], &addr[at..])
        }
        _ => addr.to_string(),
    }
}
