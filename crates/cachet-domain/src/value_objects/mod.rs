//! Value objects

pub mod config;

pub use config::{
    CacheConfig, CacheType, MemoryConfig, RedisClusterConfig, RedisConfig, RemoteTimeouts,
};
