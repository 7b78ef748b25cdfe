//! # cachet
//!
//! Backend-agnostic caching with pluggable codecs and negative caching.
//!
//! Application code talks to one [`Cache`] type whatever the backend: an
//! in-process Moka cache, a single Redis server or a Redis cluster. Values
//! pass through a named codec (JSON by default), and keys known to be absent
//! upstream can be recorded with [`Cache::set_not_found`] so the next read
//! reports [`Error::Placeholder`] instead of falling through to the source.
//!
//! ## Example
//!
//! ```ignore
//! use cachet::{CacheConfig, CacheProvider};
//! use std::time::Duration;
//!
//! let provider = CacheProvider::new(CacheConfig::memory().with_key_prefix("app"))?;
//! let cache = provider.cache();
//!
//! cache.set("greeting", &"hello".to_string(), Duration::from_secs(600)).await?;
//! let greeting: String = cache.get("greeting").await?;
//!
//! provider.close().await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - cache contract, key builder, encoding layer, errors, config
//! - `providers` - Moka and Redis backend implementations
//! - `infrastructure` - providers, manager, global cache, config loading, logging

/// Domain layer - cache contract and value types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use cachet_domain::*;
}

/// Backend implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use cachet_providers::*;
}

/// Infrastructure layer - providers, manager, configuration and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use cachet_infrastructure::*;
}

pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the provider types at the crate root
pub use infrastructure::{CacheManager, CacheProvider};

// Re-export the global cache entry points
pub use infrastructure::global::{global_cache, setup_global_cache, shutdown_global_cache};
