//! Configuration management
//!
//! Layered configuration through Figment: built-in defaults, then a TOML
//! file, then `CACHET__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig};
