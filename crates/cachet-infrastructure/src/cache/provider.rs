//! Cache provider
//!
//! Turns a [`CacheConfig`] into a ready [`Cache`]: defaults are applied, the
//! configuration is validated, the codec is looked up in the registry and
//! the backend is resolved through the linkme backend registry.

use cachet_domain::Cache;
use cachet_domain::encoding::{Codec, get_codec, registered_codecs};
use cachet_domain::error::{Error, Result};
use cachet_domain::ports::{CacheBackend, resolve_cache_backend};
use cachet_domain::value_objects::CacheConfig;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

// Force linking of the backend implementations so their registrations are present
extern crate cachet_providers;

/// A configured cache and the backend behind it
///
/// The provider is the only owner allowed to release the backend. Handles
/// returned by [`cache`](Self::cache) can read and write but not close.
pub struct CacheProvider {
    config: CacheConfig,
    cache: Cache,
    backend: Arc<dyn CacheBackend>,
    closed: AtomicBool,
}

impl CacheProvider {
    /// Build a provider from `config`
    ///
    /// An absent or empty codec name selects raw binary encoding.
    ///
    /// # Errors
    /// * [`Error::Config`] - missing remote address, unknown codec, or no
    ///   backend registered for the configured type
    pub fn new(config: CacheConfig) -> Result<Self> {
        let config = config.with_defaults();
        config.validate()?;

        let codec = resolve_codec(config.codec.as_deref())?;
        let backend = resolve_cache_backend(&config)?;
        Ok(Self::assemble(config, codec, backend))
    }

    /// Build a provider over an already constructed backend
    ///
    /// `config` supplies the prefix, TTLs and codec; its backend selector and
    /// backend blocks are ignored.
    pub fn with_backend(config: CacheConfig, backend: Arc<dyn CacheBackend>) -> Result<Self> {
        let config = config.with_defaults();
        let codec = resolve_codec(config.codec.as_deref())?;
        Ok(Self::assemble(config, codec, backend))
    }

    fn assemble(
        config: CacheConfig,
        codec: Option<Arc<dyn Codec>>,
        backend: Arc<dyn CacheBackend>,
    ) -> Self {
        let cache = Cache::new(Arc::clone(&backend))
            .with_key_prefix(config.key_prefix.clone())
            .with_codec(codec)
            .with_default_ttl(config.default_ttl())
            .with_not_found_ttl(config.not_found_ttl());

        info!(
            cache_type = %config.cache_type,
            backend = cache.backend_name(),
            key_prefix = %config.key_prefix,
            "Cache provider created"
        );

        Self {
            config,
            cache,
            backend,
            closed: AtomicBool::new(false),
        }
    }

    /// The configured cache
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Effective configuration, with defaults applied
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Release the backend; repeated calls are no-ops
    ///
    /// A failed close leaves the provider open so it can be retried.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            debug!(backend = self.cache.backend_name(), "Cache provider already closed");
            return Ok(());
        }
        if let Err(err) = self.backend.close().await {
            self.closed.store(false, Ordering::Release);
            return Err(err);
        }
        info!(backend = self.cache.backend_name(), "Cache provider closed");
        Ok(())
    }
}

impl fmt::Debug for CacheProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheProvider")
            .field("cache", &self.cache)
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn resolve_codec(name: Option<&str>) -> Result<Option<Arc<dyn Codec>>> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    get_codec(name).map(Some).ok_or_else(|| {
        Error::config(format!(
            "Unknown codec '{name}'. Registered codecs: {:?}",
            registered_codecs()
        ))
    })
}
