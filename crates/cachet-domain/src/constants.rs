//! Domain layer constants
//!
//! Values shared by the cache contract and every backend. Infrastructure
//! tunables live in `cachet_infrastructure::constants`.

use std::time::Duration;

// ============================================================================
// NEGATIVE CACHE CONSTANTS
// ============================================================================

/// Placeholder stored for keys confirmed absent upstream
pub const NOT_FOUND_PLACEHOLDER: &str = "*";

/// Byte form of [`NOT_FOUND_PLACEHOLDER`]
pub const NOT_FOUND_PLACEHOLDER_BYTES: &[u8] = NOT_FOUND_PLACEHOLDER.as_bytes();

/// Default expiration for cached values (24 hours)
pub const DEFAULT_EXPIRE_TIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Default expiration for negative-cache placeholders (10 minutes)
pub const DEFAULT_NOT_FOUND_EXPIRE_TIME: Duration = Duration::from_secs(10 * 60);

// ============================================================================
// KEY CONSTANTS
// ============================================================================

/// Separator between the key prefix and the logical key
pub const CACHE_KEY_SEPARATOR: &str = ":";

// ============================================================================
// CODEC CONSTANTS
// ============================================================================

/// Registry name of the JSON codec
pub const JSON_CODEC_NAME: &str = "json";

/// Registry name of the YAML codec
pub const YAML_CODEC_NAME: &str = "yaml";

// ============================================================================
// BACKEND DEFAULTS
// ============================================================================

/// Default in-process cache cost budget in bytes (1 GiB)
pub const MEMORY_DEFAULT_MAX_COST: u64 = 1 << 30;

/// Default initial capacity of the in-process cache
pub const MEMORY_DEFAULT_INITIAL_CAPACITY: usize = 10_000;

/// Default number of pooled connections per remote node
pub const REDIS_DEFAULT_POOL_SIZE: usize = 10;

/// Default connection establishment timeout in milliseconds
pub const REDIS_DEFAULT_DIAL_TIMEOUT_MS: u64 = 5_000;

/// Default read timeout in milliseconds
pub const REDIS_DEFAULT_READ_TIMEOUT_MS: u64 = 3_000;

/// Default write timeout in milliseconds
pub const REDIS_DEFAULT_WRITE_TIMEOUT_MS: u64 = 3_000;
