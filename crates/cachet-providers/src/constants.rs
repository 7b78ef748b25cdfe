//! Backend Constants
//!
//! Constants specific to backend implementations. Protocol defaults such as
//! TTLs and pool sizes live in `cachet_domain::constants`.

// ============================================================================
// BACKEND NAMES
// ============================================================================

/// Implementation name reported by the in-process backend
pub const MOKA_BACKEND_NAME: &str = "moka";

/// Implementation name reported by the single-node remote backend
pub const REDIS_BACKEND_NAME: &str = "redis";

/// Implementation name reported by the clustered remote backend
pub const REDIS_CLUSTER_BACKEND_NAME: &str = "redis_cluster";

// ============================================================================
// REDIS CONNECTION CONSTANTS
// ============================================================================

/// Plain-text connection URL scheme
pub const REDIS_URL_SCHEME: &str = "redis://";

/// TLS connection URL scheme
pub const REDIS_TLS_URL_SCHEME: &str = "rediss://";

/// Message returned by any call made after `close`
pub const BACKEND_CLOSED_MESSAGE: &str = "cache backend is closed";
