//! # cachet - Backend Implementations
//!
//! Storage engines implementing the [`CacheBackend`] port defined in
//! `cachet-domain`. Each backend registers itself in the domain's
//! `CACHE_BACKENDS` slice at link time, so depending on this crate is
//! enough to make it resolvable from a [`CacheConfig`](cachet_domain::CacheConfig).
//!
//! | Backend | Registry name | Implementation |
//! |---------|---------------|----------------|
//! | In-process | `memory` | [`cache::MokaBackend`] |
//! | Single node | `redis` | [`cache::RedisBackend`] over [`cache::RedisNode`] |
//! | Cluster | `redis_cluster` | [`cache::RedisBackend`] over [`cache::RedisClusterNodes`] |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! cachet-providers = { version = "0.1", default-features = false, features = ["cache-moka"] }
//! ```

// Re-export cachet-domain types commonly used with backends
pub use cachet_domain::error::{Error, Result};
pub use cachet_domain::ports::CacheBackend;

/// Backend-specific constants
pub mod constants;

/// Cache backend implementations
///
/// Implements the `CacheBackend` port for each storage engine.
pub mod cache;
