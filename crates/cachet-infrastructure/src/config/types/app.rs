//! Main application configuration

use super::logging::LoggingConfig;
use cachet_domain::value_objects::CacheConfig;
use serde::{Deserialize, Serialize};

/// Application configuration root
///
/// ```toml
/// [cache]
/// type = "redis"
/// key_prefix = "app"
///
/// [cache.redis]
/// addr = "localhost:6379"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Cache provider configuration
    pub cache: CacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}
