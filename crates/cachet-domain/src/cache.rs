//! Cache contract and negative-cache protocol
//!
//! [`Cache`] is the single implementation of the read/write contract. It
//! derives physical keys, runs values through the encoding layer and
//! interprets placeholders, then hands bytes to a [`CacheBackend`]. Because
//! the protocol lives here rather than in each backend, every backend
//! behaves identically apart from transport.
//!
//! ## Negative caching
//!
//! ```ignore
//! match cache.get::<User>("u:2").await {
//!     Ok(user) => Some(user),
//!     Err(e) if e.is_placeholder() => None, // known absent upstream
//!     Err(e) if e.is_miss() => match db.find_user(2).await? {
//!         Some(user) => {
//!             cache.set("u:2", &user, ttl).await?;
//!             Some(user)
//!         }
//!         None => {
//!             cache.set_not_found("u:2").await?;
//!             None
//!         }
//!     },
//!     Err(e) => return Err(e),
//! }
//! ```

use crate::constants::{
    DEFAULT_EXPIRE_TIME, DEFAULT_NOT_FOUND_EXPIRE_TIME, NOT_FOUND_PLACEHOLDER_BYTES,
};
use crate::encoding::{CacheValue, Codec, JsonCodec, marshal, unmarshal};
use crate::error::{Error, Result};
use crate::key::build_cache_key;
use crate::ports::CacheBackend;
use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Whether stored bytes mark a negative-cache entry
///
/// Empty bytes count as a placeholder: an empty encoding and a confirmed
/// absence are indistinguishable once stored.
pub fn is_placeholder(data: &[u8]) -> bool {
    data.is_empty() || data == NOT_FOUND_PLACEHOLDER_BYTES
}

/// Uniform cache over any [`CacheBackend`]
///
/// Cloning is cheap; clones share the backend. Releasing the backend is
/// left to whoever built the cache.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn CacheBackend>,
    key_prefix: String,
    codec: Option<Arc<dyn Codec>>,
    default_ttl: Duration,
    not_found_ttl: Duration,
}

// Construction and Configuration Methods
impl Cache {
    /// Create a cache over `backend` with no prefix and the JSON codec
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            key_prefix: String::new(),
            codec: Some(Arc::new(JsonCodec)),
            default_ttl: DEFAULT_EXPIRE_TIME,
            not_found_ttl: DEFAULT_NOT_FOUND_EXPIRE_TIME,
        }
    }

    /// Set the key prefix
    pub fn with_key_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Set the codec; `None` stores values in their raw binary form
    pub fn with_codec(mut self, codec: Option<Arc<dyn Codec>>) -> Self {
        self.codec = codec;
        self
    }

    /// Set the default TTL reported by [`default_ttl`](Self::default_ttl)
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Set the TTL used by [`set_not_found`](Self::set_not_found)
    pub fn with_not_found_ttl(mut self, ttl: Duration) -> Self {
        self.not_found_ttl = ttl;
        self
    }

    /// Configured key prefix
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Configured default TTL
    ///
    /// Never applied implicitly; pass it to [`set`](Self::set) explicitly.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// TTL of negative-cache placeholders
    pub fn not_found_ttl(&self) -> Duration {
        self.not_found_ttl
    }

    /// Configured codec, if any
    pub fn codec(&self) -> Option<&Arc<dyn Codec>> {
        self.codec.as_ref()
    }

    /// Name of the backend executing operations
    pub fn backend_name(&self) -> &str {
        self.backend.backend_name()
    }

    /// Physical key for `key` under this cache's prefix
    pub fn cache_key(&self, key: &str) -> Result<String> {
        build_cache_key(&self.key_prefix, key)
    }

    fn encode<T: CacheValue>(&self, key: &str, value: &T) -> Result<Vec<u8>> {
        let data = marshal(self.codec.as_deref(), value).map_err(|e| {
            Error::encode(key, type_name::<T>(), e.to_string(), Some(Box::new(e)))
        })?;

        if data.is_empty() {
            return Ok(NOT_FOUND_PLACEHOLDER_BYTES.to_vec());
        }
        Ok(data)
    }

    fn build_keys<K: AsRef<str>>(&self, keys: &[K]) -> Vec<String> {
        keys.iter()
            .filter_map(|key| match self.cache_key(key.as_ref()) {
                Ok(cache_key) => Some(cache_key),
                Err(err) => {
                    warn!(key = key.as_ref(), error = %err, "Skipping invalid cache key");
                    None
                }
            })
            .collect()
    }
}

// Cache Operations Methods
impl Cache {
    /// Store `value` under `key` for `ttl` (`Duration::ZERO` never expires)
    ///
    /// A value that encodes to zero bytes is stored as the placeholder.
    pub async fn set<T: CacheValue>(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        let data = self.encode(key, value)?;
        let cache_key = self.cache_key(key)?;
        self.backend.set(&cache_key, &data, ttl).await
    }

    /// Read the value stored under `key`
    ///
    /// # Errors
    /// * [`Error::Miss`] - nothing is stored under the key
    /// * [`Error::Placeholder`] - the key holds a negative-cache entry
    /// * [`Error::Decode`] - the stored bytes do not decode into `T`
    pub async fn get<T: CacheValue>(&self, key: &str) -> Result<T> {
        let cache_key = self.cache_key(key)?;

        let data = self
            .backend
            .get(&cache_key)
            .await?
            .ok_or_else(|| Error::miss(&cache_key))?;

        if is_placeholder(&data) {
            return Err(Error::placeholder(cache_key));
        }

        unmarshal(self.codec.as_deref(), &data).map_err(|e| {
            Error::decode(
                key,
                &cache_key,
                type_name::<T>(),
                e.to_string(),
                Some(Box::new(e)),
            )
        })
    }

    /// Store every entry of `values` with the same `ttl`
    ///
    /// Entries whose key or value cannot be prepared are logged and left
    /// out; the rest are written in one batch. A transport failure fails
    /// the whole call.
    pub async fn multi_set<K, T>(&self, values: &HashMap<K, T>, ttl: Duration) -> Result<()>
    where
        K: AsRef<str>,
        T: CacheValue,
    {
        let mut entries = Vec::with_capacity(values.len());
        for (key, value) in values {
            let key = key.as_ref();
            let data = match self.encode(key, value) {
                Ok(data) => data,
                Err(err) => {
                    warn!(key, error = %err, "Skipping cache entry that failed to encode");
                    continue;
                }
            };
            let cache_key = match self.cache_key(key) {
                Ok(cache_key) => cache_key,
                Err(err) => {
                    warn!(key, error = %err, "Skipping invalid cache key");
                    continue;
                }
            };
            entries.push((cache_key, data));
        }

        if entries.is_empty() {
            return Ok(());
        }

        debug!(count = entries.len(), skipped = values.len() - entries.len(), "Writing cache batch");
        self.backend.multi_set(&entries, ttl).await
    }

    /// Read `keys` into `values`, keyed by physical key
    ///
    /// Absent keys, placeholders and undecodable entries contribute
    /// nothing. `values` is never cleared, so callers may pre-populate it.
    pub async fn multi_get<K, T>(&self, keys: &[K], values: &mut HashMap<String, T>) -> Result<()>
    where
        K: AsRef<str>,
        T: CacheValue,
    {
        let cache_keys = self.build_keys(keys);
        if cache_keys.is_empty() {
            return Ok(());
        }

        let slots = self.backend.multi_get(&cache_keys).await?;

        for (cache_key, slot) in cache_keys.into_iter().zip(slots) {
            let Some(data) = slot else {
                continue;
            };
            if is_placeholder(&data) {
                continue;
            }
            match unmarshal::<T>(self.codec.as_deref(), &data) {
                Ok(value) => {
                    values.insert(cache_key, value);
                }
                Err(err) => {
                    warn!(
                        cache_key = %cache_key,
                        value_type = type_name::<T>(),
                        error = %err,
                        "Skipping cache entry that failed to decode"
                    );
                }
            }
        }
        Ok(())
    }

    /// Delete `keys`; an empty list is a no-op
    pub async fn del<K: AsRef<str>>(&self, keys: &[K]) -> Result<()> {
        let cache_keys = self.build_keys(keys);
        if cache_keys.is_empty() {
            return Ok(());
        }
        self.backend.delete(&cache_keys).await
    }

    /// Record that `key` is absent upstream
    ///
    /// Writes the placeholder with the not-found TTL; until it expires or is
    /// overwritten, [`get`](Self::get) returns [`Error::Placeholder`].
    pub async fn set_not_found(&self, key: &str) -> Result<()> {
        let cache_key = self.cache_key(key)?;
        self.backend
            .set(&cache_key, NOT_FOUND_PLACEHOLDER_BYTES, self.not_found_ttl)
            .await
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("backend", &self.backend.backend_name())
            .field("key_prefix", &self.key_prefix)
            .field("codec", &self.codec.as_ref().map(|c| c.name()))
            .field("default_ttl", &self.default_ttl)
            .field("not_found_ttl", &self.not_found_ttl)
            .finish()
    }
}
