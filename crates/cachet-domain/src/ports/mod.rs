//! Domain ports
//!
//! Boundary traits the domain depends on and the registry through which
//! their implementations are discovered.

pub mod backend;
pub mod registry;

pub use backend::CacheBackend;
pub use registry::{
    CACHE_BACKENDS, CacheBackendEntry, is_backend_registered, list_cache_backends,
    resolve_cache_backend,
};
