//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Cache protocol constants are defined in `cachet_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cachet.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "cachet";

/// Environment variable prefix for configuration (`CACHET__CACHE__KEY_PREFIX`)
pub const CONFIG_ENV_PREFIX: &str = "CACHET";

/// Separator between the prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "CACHET_LOG";

/// File name stem used when the log file path has none
pub const LOG_FILE_STEM: &str = "cachet";
