//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the wrapping variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for cachet
#[derive(Error, Debug)]
pub enum Error {
    /// The logical key passed to the key builder was empty
    #[error("Cache key cannot be empty")]
    EmptyKey,

    /// A value could not be encoded before being written
    #[error("Encode error: {message}, key={key}, type={type_name}")]
    Encode {
        /// Logical key the value was destined for
        key: String,
        /// Rust type name of the value
        type_name: &'static str,
        /// Description of the encoding failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Stored bytes could not be decoded into the requested type
    #[error("Decode error: {message}, key={key}, cache_key={physical_key}, type={type_name}")]
    Decode {
        /// Logical key that was read
        key: String,
        /// Physical key the bytes were read from
        physical_key: String,
        /// Rust type name of the requested value
        type_name: &'static str,
        /// Description of the decoding failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// The backend has no entry for the key
    #[error("Cache miss: {key}")]
    Miss {
        /// Physical key that was looked up
        key: String,
    },

    /// The entry is a negative-cache placeholder
    #[error("Cache placeholder hit: {key}")]
    Placeholder {
        /// Physical key holding the placeholder
        key: String,
    },

    /// Transport-level failure while writing
    #[error("Backend write error: {message}, cache_key={key}")]
    BackendWrite {
        /// Physical key (or key list) being written
        key: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Transport-level failure while reading
    #[error("Backend read error: {message}, cache_key={key}")]
    BackendRead {
        /// Physical key (or key list) being read
        key: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Missing or invalid provider configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Codec failure outside of a keyed cache operation
    #[error("Codec error: {message}")]
    Codec {
        /// Description of the codec error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// No provider registered under the name
    #[error("Cache provider not found: {name}")]
    ProviderNotFound {
        /// Name that was looked up
        name: String,
    },

    /// One or more providers failed to close
    #[error("Failed to close {} cache provider(s): {}", failures.len(), describe_failures(failures))]
    CloseAll {
        /// Provider name and the error it returned
        failures: Vec<(String, Error)>,
    },

    /// Infrastructure failure outside the cache protocol
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

fn describe_failures(failures: &[(String, Error)]) -> String {
    failures
        .iter()
        .map(|(name, err)| format!("{name}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

// Cache protocol error creation methods
impl Error {
    /// Create a backend miss error
    pub fn miss<S: Into<String>>(key: S) -> Self {
        Self::Miss { key: key.into() }
    }

    /// Create a placeholder hit error
    pub fn placeholder<S: Into<String>>(key: S) -> Self {
        Self::Placeholder { key: key.into() }
    }

    /// Create an encode error
    pub fn encode<K: Into<String>, M: Into<String>>(
        key: K,
        type_name: &'static str,
        message: M,
        source: Option<BoxError>,
    ) -> Self {
        Self::Encode {
            key: key.into(),
            type_name,
            message: message.into(),
            source,
        }
    }

    /// Create a decode error
    pub fn decode<K: Into<String>, P: Into<String>, M: Into<String>>(
        key: K,
        physical_key: P,
        type_name: &'static str,
        message: M,
        source: Option<BoxError>,
    ) -> Self {
        Self::Decode {
            key: key.into(),
            physical_key: physical_key.into(),
            type_name,
            message: message.into(),
            source,
        }
    }
}

// Backend error creation methods
impl Error {
    /// Create a backend write error
    pub fn backend_write<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::BackendWrite {
            key: key.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend write error with source
    pub fn backend_write_with_source<K, M, E>(key: K, message: M, source: E) -> Self
    where
        K: Into<String>,
        M: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::BackendWrite {
            key: key.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a backend read error
    pub fn backend_read<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::BackendRead {
            key: key.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend read error with source
    pub fn backend_read_with_source<K, M, E>(key: K, message: M, source: E) -> Self
    where
        K: Into<String>,
        M: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::BackendRead {
            key: key.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration and lifecycle error creation methods
impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a codec error
    pub fn codec<S: Into<String>>(message: S, source: Option<BoxError>) -> Self {
        Self::Codec {
            message: message.into(),
            source,
        }
    }

    /// Create a provider not found error
    pub fn provider_not_found<S: Into<String>>(name: S) -> Self {
        Self::ProviderNotFound { name: name.into() }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification helpers
impl Error {
    /// Nothing was ever cached under the key
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }

    /// A negative-cache entry was found for the key
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Check if this is a backend transport error
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Self::BackendRead { .. } | Self::BackendWrite { .. })
    }
}
