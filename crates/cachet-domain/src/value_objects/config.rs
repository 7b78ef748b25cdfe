//! Cache configuration value objects
//!
//! A [`CacheConfig`] selects one backend and carries the settings shared by
//! every backend (key prefix, TTLs, codec) plus one backend-specific block.
//! Zero-valued tunables are replaced by defaults in
//! [`CacheConfig::with_defaults`] before any backend client is built.

use crate::constants::*;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Cache backend selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CacheType {
    /// Bounded in-process cache (Moka)
    #[default]
    Memory,
    /// Single-node remote cache (Redis)
    Redis,
    /// Clustered remote cache (Redis Cluster)
    RedisCluster,
}

impl CacheType {
    /// Registry name of the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Redis => "redis",
            Self::RedisCluster => "redis_cluster",
        }
    }
}

impl fmt::Display for CacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Backend selector
    #[serde(rename = "type")]
    pub cache_type: CacheType,

    /// Prefix prepended to every logical key (`prefix:key`)
    pub key_prefix: String,

    /// Default TTL in seconds, exposed to callers through `Cache::default_ttl`
    pub default_ttl_secs: u64,

    /// TTL in seconds of negative-cache placeholders
    pub not_found_ttl_secs: u64,

    /// Registered codec name; `None` stores values in their raw binary form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,

    /// In-process backend settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryConfig>,

    /// Single-node remote backend settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<RedisConfig>,

    /// Clustered remote backend settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_cluster: Option<RedisClusterConfig>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: CacheType::Memory,
            key_prefix: String::new(),
            default_ttl_secs: DEFAULT_EXPIRE_TIME.as_secs(),
            not_found_ttl_secs: DEFAULT_NOT_FOUND_EXPIRE_TIME.as_secs(),
            codec: Some(JSON_CODEC_NAME.to_string()),
            memory: Some(MemoryConfig::default()),
            redis: None,
            redis_cluster: None,
        }
    }
}

impl CacheConfig {
    /// In-process cache with default settings
    pub fn memory() -> Self {
        Self::default()
    }

    /// Single-node remote cache at `addr`
    pub fn redis<S: Into<String>>(addr: S) -> Self {
        Self {
            cache_type: CacheType::Redis,
            memory: None,
            redis: Some(RedisConfig::new(addr)),
            ..Self::default()
        }
    }

    /// Clustered remote cache seeded with `addrs`
    pub fn redis_cluster<I, S>(addrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cache_type: CacheType::RedisCluster,
            memory: None,
            redis_cluster: Some(RedisClusterConfig::new(addrs)),
            ..Self::default()
        }
    }

    /// Set the key prefix
    pub fn with_key_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Set the codec name; `None` selects raw binary encoding
    pub fn with_codec<S: Into<String>>(mut self, codec: Option<S>) -> Self {
        self.codec = codec.map(Into::into);
        self
    }

    /// Set the default TTL
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl_secs = ttl.as_secs();
        self
    }

    /// Set the negative-cache TTL
    pub fn with_not_found_ttl(mut self, ttl: Duration) -> Self {
        self.not_found_ttl_secs = ttl.as_secs();
        self
    }

    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Negative-cache TTL as a duration
    pub fn not_found_ttl(&self) -> Duration {
        Duration::from_secs(self.not_found_ttl_secs)
    }

    /// Replace zero-valued tunables with their defaults
    ///
    /// The in-process block is created when missing; remote blocks are
    /// only completed, never invented, since their addresses are required.
    pub fn with_defaults(mut self) -> Self {
        if self.default_ttl_secs == 0 {
            self.default_ttl_secs = DEFAULT_EXPIRE_TIME.as_secs();
        }
        if self.not_found_ttl_secs == 0 {
            self.not_found_ttl_secs = DEFAULT_NOT_FOUND_EXPIRE_TIME.as_secs();
        }

        match self.cache_type {
            CacheType::Memory => {
                self.memory = Some(self.memory.unwrap_or_default().with_defaults());
            }
            CacheType::Redis => {
                self.redis = self.redis.map(RedisConfig::with_defaults);
            }
            CacheType::RedisCluster => {
                self.redis_cluster = self.redis_cluster.map(RedisClusterConfig::with_defaults);
            }
        }
        self
    }

    /// Check that the block required by the selected backend is usable
    ///
    /// # Errors
    /// * [`Error::Config`] when a remote backend has no address
    pub fn validate(&self) -> Result<()> {
        match self.cache_type {
            CacheType::Memory => Ok(()),
            CacheType::Redis => match &self.redis {
                None => Err(Error::config("Redis configuration cannot be empty")),
                Some(redis) if redis.addr.trim().is_empty() => {
                    Err(Error::config("Redis address cannot be empty"))
                }
                Some(_) => Ok(()),
            },
            CacheType::RedisCluster => match &self.redis_cluster {
                None => Err(Error::config("Redis cluster configuration cannot be empty")),
                Some(cluster) if cluster.addrs.is_empty() => {
                    Err(Error::config("Redis cluster address list cannot be empty"))
                }
                Some(cluster) if cluster.addrs.iter().any(|a| a.trim().is_empty()) => {
                    Err(Error::config("Redis cluster address list contains an empty address"))
                }
                Some(_) => Ok(()),
            },
        }
    }
}

/// In-process cache configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MemoryConfig {
    /// Total cost budget; each entry costs its key plus value length in bytes
    pub max_cost: u64,

    /// Number of entries the cache pre-allocates room for
    pub initial_capacity: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_cost: MEMORY_DEFAULT_MAX_COST,
            initial_capacity: MEMORY_DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl MemoryConfig {
    /// Replace zero-valued tunables with their defaults
    pub fn with_defaults(mut self) -> Self {
        if self.max_cost == 0 {
            self.max_cost = MEMORY_DEFAULT_MAX_COST;
        }
        if self.initial_capacity == 0 {
            self.initial_capacity = MEMORY_DEFAULT_INITIAL_CAPACITY;
        }
        self
    }
}

/// Connection timeouts shared by the remote backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteTimeouts {
    /// Connection establishment
    pub dial: Duration,
    /// Commands that only read
    pub read: Duration,
    /// Commands that write or delete
    pub write: Duration,
}

impl Default for RemoteTimeouts {
    fn default() -> Self {
        Self {
            dial: Duration::from_millis(REDIS_DEFAULT_DIAL_TIMEOUT_MS),
            read: Duration::from_millis(REDIS_DEFAULT_READ_TIMEOUT_MS),
            write: Duration::from_millis(REDIS_DEFAULT_WRITE_TIMEOUT_MS),
        }
    }
}

/// Single-node remote cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RedisConfig {
    /// Server address, `host:port` or a `redis://` URL
    pub addr: String,

    /// Password, if the server requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Database index
    pub db: i64,

    /// Number of multiplexed connections used round-robin
    pub pool_size: usize,

    /// Minimum idle connections; accepted but not applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_idle_conns: Option<usize>,

    /// Maximum idle connections; accepted but not applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_idle_conns: Option<usize>,

    /// Maximum connection lifetime in seconds; accepted but not applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conn_max_lifetime_secs: Option<u64>,

    /// Connection establishment timeout in milliseconds
    pub dial_timeout_ms: u64,

    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,

    /// Write timeout in milliseconds
    pub write_timeout_ms: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            addr: String::new(),
            password: None,
            db: 0,
            pool_size: REDIS_DEFAULT_POOL_SIZE,
            min_idle_conns: None,
            max_idle_conns: None,
            conn_max_lifetime_secs: None,
            dial_timeout_ms: REDIS_DEFAULT_DIAL_TIMEOUT_MS,
            read_timeout_ms: REDIS_DEFAULT_READ_TIMEOUT_MS,
            write_timeout_ms: REDIS_DEFAULT_WRITE_TIMEOUT_MS,
        }
    }
}

impl RedisConfig {
    /// Default settings for the server at `addr`
    pub fn new<S: Into<String>>(addr: S) -> Self {
        Self {
            addr: addr.into(),
            ..Self::default()
        }
    }

    /// Set the password
    pub fn with_password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Replace zero-valued tunables with their defaults
    pub fn with_defaults(mut self) -> Self {
        if self.pool_size == 0 {
            self.pool_size = REDIS_DEFAULT_POOL_SIZE;
        }
        if self.dial_timeout_ms == 0 {
            self.dial_timeout_ms = REDIS_DEFAULT_DIAL_TIMEOUT_MS;
        }
        if self.read_timeout_ms == 0 {
            self.read_timeout_ms = REDIS_DEFAULT_READ_TIMEOUT_MS;
        }
        if self.write_timeout_ms == 0 {
            self.write_timeout_ms = REDIS_DEFAULT_WRITE_TIMEOUT_MS;
        }
        self
    }

    /// Configured timeouts
    pub fn timeouts(&self) -> RemoteTimeouts {
        RemoteTimeouts {
            dial: Duration::from_millis(self.dial_timeout_ms),
            read: Duration::from_millis(self.read_timeout_ms),
            write: Duration::from_millis(self.write_timeout_ms),
        }
    }

    /// Names of the pool tuning keys that are set but have no effect
    ///
    /// Connections are multiplexed and reconnect on their own, so idle
    /// counts and lifetimes have nothing to act on.
    pub fn unapplied_pool_settings(&self) -> Vec<&'static str> {
        unapplied_pool_settings(
            None,
            self.min_idle_conns,
            self.max_idle_conns,
            self.conn_max_lifetime_secs,
        )
    }
}

/// Clustered remote cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RedisClusterConfig {
    /// Seed node addresses, `host:port` or `redis://` URLs
    pub addrs: Vec<String>,

    /// Password, if the cluster requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Connection pool size; accepted but not applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<usize>,

    /// Minimum idle connections; accepted but not applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_idle_conns: Option<usize>,

    /// Maximum idle connections; accepted but not applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_idle_conns: Option<usize>,

    /// Maximum connection lifetime in seconds; accepted but not applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conn_max_lifetime_secs: Option<u64>,

    /// Connection establishment timeout in milliseconds
    pub dial_timeout_ms: u64,

    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,

    /// Write timeout in milliseconds
    pub write_timeout_ms: u64,
}

impl Default for RedisClusterConfig {
    fn default() -> Self {
        Self {
            addrs: Vec::new(),
            password: None,
            pool_size: None,
            min_idle_conns: None,
            max_idle_conns: None,
            conn_max_lifetime_secs: None,
            dial_timeout_ms: REDIS_DEFAULT_DIAL_TIMEOUT_MS,
            read_timeout_ms: REDIS_DEFAULT_READ_TIMEOUT_MS,
            write_timeout_ms: REDIS_DEFAULT_WRITE_TIMEOUT_MS,
        }
    }
}

impl RedisClusterConfig {
    /// Default settings for the cluster seeded with `addrs`
    pub fn new<I, S>(addrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addrs: addrs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the password
    pub fn with_password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Replace zero-valued tunables with their defaults
    pub fn with_defaults(mut self) -> Self {
        if self.dial_timeout_ms == 0 {
            self.dial_timeout_ms = REDIS_DEFAULT_DIAL_TIMEOUT_MS;
        }
        if self.read_timeout_ms == 0 {
            self.read_timeout_ms = REDIS_DEFAULT_READ_TIMEOUT_MS;
        }
        if self.write_timeout_ms == 0 {
            self.write_timeout_ms = REDIS_DEFAULT_WRITE_TIMEOUT_MS;
        }
        self
    }

    /// Configured timeouts
    pub fn timeouts(&self) -> RemoteTimeouts {
        RemoteTimeouts {
            dial: Duration::from_millis(self.dial_timeout_ms),
            read: Duration::from_millis(self.read_timeout_ms),
            write: Duration::from_millis(self.write_timeout_ms),
        }
    }

    /// Names of the pool tuning keys that are set but have no effect
    ///
    /// The cluster client keeps one multiplexed connection per node.
    pub fn unapplied_pool_settings(&self) -> Vec<&'static str> {
        unapplied_pool_settings(
            self.pool_size,
            self.min_idle_conns,
            self.max_idle_conns,
            self.conn_max_lifetime_secs,
        )
    }
}

fn unapplied_pool_settings(
    pool_size: Option<usize>,
    min_idle_conns: Option<usize>,
    max_idle_conns: Option<usize>,
    conn_max_lifetime_secs: Option<u64>,
) -> Vec<&'static str> {
    [
        ("pool_size", pool_size.is_some()),
        ("min_idle_conns", min_idle_conns.is_some()),
        ("max_idle_conns", max_idle_conns.is_some()),
        ("conn_max_lifetime_secs", conn_max_lifetime_secs.is_some()),
    ]
    .into_iter()
    .filter_map(|(name, set)| set.then_some(name))
    .collect()
}
