//! # Infrastructure Layer
//!
//! Everything needed to run a [`Cache`](cachet_domain::Cache) in a process:
//! building it from configuration, owning its backend, and the ambient
//! logging and configuration plumbing.
//!
//! ## Module Categories
//!
//! ### Caches
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Cache provider and named provider manager |
//! | [`global`] | Process-wide default cache with explicit lifecycle |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered TOML and environment configuration |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod global;
pub mod logging;

// Re-export commonly used types
pub use cache::{CacheManager, CacheProvider};
pub use config::{AppConfig, ConfigLoader, LoggingConfig};
pub use error_ext::ErrorContext;
