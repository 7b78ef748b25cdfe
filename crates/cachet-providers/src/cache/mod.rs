//! Cache Backend Implementations
//!
//! ## Available Backends
//!
//! | Backend | Type | Description |
//! |---------|------|-------------|
//! | [`MokaBackend`] | Local | Bounded in-process cache with per-entry TTL |
//! | [`RedisBackend`] | Distributed | Redis single node or cluster |
//!
//! ## Backend Selection Guide
//!
//! - **Single Instance**: Use `memory` for the lowest latency
//! - **Multi Instance**: Use `redis` or `redis_cluster` to share entries

#[cfg(feature = "cache-moka")]
pub mod moka;
#[cfg(feature = "cache-redis")]
pub mod redis;

// Re-export for convenience
#[cfg(feature = "cache-moka")]
pub use moka::MokaBackend;
#[cfg(feature = "cache-redis")]
pub use redis::{RedisBackend, RedisClusterNodes, RedisConnector, RedisNode};
