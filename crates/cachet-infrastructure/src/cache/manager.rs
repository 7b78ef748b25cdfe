//! Named cache provider registry
//!
//! Lets one process hold several independently configured caches, e.g. a
//! short-lived in-process cache next to a shared remote one, and shut them
//! all down together.

use super::provider::CacheProvider;
use cachet_domain::Cache;
use cachet_domain::error::{Error, Result};
use cachet_domain::value_objects::CacheConfig;
use dashmap::DashMap;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of named cache providers
#[derive(Debug, Default)]
pub struct CacheManager {
    providers: DashMap<String, Arc<CacheProvider>>,
}

impl CacheManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` under `name`
    ///
    /// Returns the provider previously registered under the name, which is
    /// left open for the caller to close.
    pub fn add<S: Into<String>>(
        &self,
        name: S,
        provider: CacheProvider,
    ) -> Option<Arc<CacheProvider>> {
        let name = name.into();
        debug!(name = %name, "Registering cache provider");
        self.providers.insert(name, Arc::new(provider))
    }

    /// Build a provider from `config` and register it under `name`
    ///
    /// Like [`add`](Self::add), returns the provider previously registered
    /// under the name, left open for the caller to close.
    ///
    /// # Errors
    /// * any error from [`CacheProvider::new`]; nothing is registered then
    pub fn add_from_config<S: Into<String>>(
        &self,
        name: S,
        config: CacheConfig,
    ) -> Result<Option<Arc<CacheProvider>>> {
        let provider = CacheProvider::new(config)?;
        Ok(self.add(name, provider))
    }

    /// Provider registered under `name`
    pub fn get(&self, name: &str) -> Option<Arc<CacheProvider>> {
        self.providers.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Cache of the provider registered under `name`
    pub fn cache(&self, name: &str) -> Option<Cache> {
        self.providers
            .get(name)
            .map(|entry| entry.value().cache().clone())
    }

    /// Close the provider registered under `name`, then forget it
    ///
    /// A provider registered under the same name while the close was in
    /// flight is left in place.
    ///
    /// # Errors
    /// * [`Error::ProviderNotFound`] - nothing is registered under the name
    /// * the close error, in which case the provider stays registered
    pub async fn remove(&self, name: &str) -> Result<()> {
        let provider = self
            .get(name)
            .ok_or_else(|| Error::provider_not_found(name))?;

        provider.close().await?;
        if self
            .providers
            .remove_if(name, |_, current| Arc::ptr_eq(current, &provider))
            .is_some()
        {
            debug!(name, "Cache provider removed");
        } else {
            debug!(name, "Cache provider closed; name was re-registered meanwhile");
        }
        Ok(())
    }

    /// Registered names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .providers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Close every provider and forget the ones that closed
    ///
    /// Providers are closed concurrently and every one is attempted even
    /// after a failure. Providers that fail to close stay registered, so the
    /// call can be retried.
    ///
    /// # Errors
    /// * [`Error::CloseAll`] listing each provider that failed to close,
    ///   in name order
    pub async fn close_all(&self) -> Result<()> {
        let drained: Vec<(String, Arc<CacheProvider>)> = self
            .list()
            .into_iter()
            .filter_map(|name| self.providers.remove(&name))
            .collect();

        let closes = drained.iter().map(|(_, provider)| provider.close());
        let results = join_all(closes).await;

        let mut failures = Vec::new();
        for ((name, provider), result) in drained.into_iter().zip(results) {
            if let Err(err) = result {
                warn!(name = %name, error = %err, "Failed to close cache provider");
                self.providers.entry(name.clone()).or_insert(provider);
                failures.push((name, err));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::CloseAll { failures })
        }
    }
}
