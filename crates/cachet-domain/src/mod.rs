//! # cachet domain
//!
//! Backend-agnostic cache contract with negative caching.
//!
//! ## Modules
//!
//! - [`cache`] - the [`Cache`] contract and placeholder protocol
//! - [`key`] - physical key construction
//! - [`encoding`] - codecs, codec registry and cacheable values
//! - [`ports`] - the byte-level [`CacheBackend`] port and backend registry
//! - [`value_objects`] - configuration value objects
//! - [`error`] - error taxonomy
//! - [`constants`] - placeholder and default values

pub mod cache;
pub mod constants;
pub mod encoding;
pub mod error;
pub mod key;
pub mod ports;
pub mod value_objects;

pub use cache::{Cache, is_placeholder};
pub use constants::{
    DEFAULT_EXPIRE_TIME, DEFAULT_NOT_FOUND_EXPIRE_TIME, NOT_FOUND_PLACEHOLDER,
    NOT_FOUND_PLACEHOLDER_BYTES,
};
pub use encoding::{CacheValue, Codec, JsonCodec, RawBytes, YamlCodec};
pub use error::{Error, Result};
pub use key::build_cache_key;
pub use ports::{CacheBackend, CacheBackendEntry};
pub use value_objects::{CacheConfig, CacheType, MemoryConfig, RedisClusterConfig, RedisConfig};
