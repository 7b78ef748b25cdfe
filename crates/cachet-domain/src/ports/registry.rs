//! Cache Backend Registry
//!
//! Auto-registration system for cache backends.
//! Backends register themselves in the [`CACHE_BACKENDS`] distributed slice
//! and are discovered at runtime by their [`CacheType`] name.

use crate::error::{Error, Result};
use crate::ports::backend::CacheBackend;
use crate::value_objects::config::{CacheConfig, CacheType};
use std::sync::Arc;

/// Registry entry for cache backends
///
/// Each backend implementation registers itself with this entry using
/// `#[linkme::distributed_slice(CACHE_BACKENDS)]`. The entry contains
/// metadata and a factory function to create backend instances.
pub struct CacheBackendEntry {
    /// Name matching [`CacheType::as_str`] (e.g. "memory", "redis")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function; receives a config with defaults already applied
    pub factory: fn(&CacheConfig) -> Result<Arc<dyn CacheBackend>>,
}

// Auto-collection via linkme distributed slices - backends submit entries at compile time
#[linkme::distributed_slice]
pub static CACHE_BACKENDS: [CacheBackendEntry] = [..];

/// Resolve and create the backend selected by `config.cache_type`
///
/// # Errors
/// * [`Error::Config`] if no backend is registered for the type, or the
///   factory rejects the configuration
pub fn resolve_cache_backend(config: &CacheConfig) -> Result<Arc<dyn CacheBackend>> {
    let name = config.cache_type.as_str();

    if let Some(entry) = CACHE_BACKENDS.iter().find(|entry| entry.name == name) {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = CACHE_BACKENDS.iter().map(|e| e.name).collect();
    Err(Error::config(format!(
        "Unknown cache backend '{name}'. Available backends: {available:?}"
    )))
}

/// List all registered cache backends
///
/// Returns `(name, description)` pairs, sorted by name.
pub fn list_cache_backends() -> Vec<(&'static str, &'static str)> {
    let mut backends: Vec<(&'static str, &'static str)> = CACHE_BACKENDS
        .iter()
        .map(|e| (e.name, e.description))
        .collect();
    backends.sort_unstable();
    backends
}

/// Check whether a backend is registered for the cache type
pub fn is_backend_registered(cache_type: &CacheType) -> bool {
    CACHE_BACKENDS
        .iter()
        .any(|entry| entry.name == cache_type.as_str())
}
