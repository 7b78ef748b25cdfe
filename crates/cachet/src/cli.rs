//! Command line interface
//!
//! `cachet [--config PATH] <COMMAND>` runs one cache operation against the
//! configured backend. Values are read and printed as JSON.
//!
//! | Command | Operation |
//! |---------|-----------|
//! | `get KEY` | [`Cache::get`], printed as JSON |
//! | `set KEY JSON [--ttl 10m]` | [`Cache::set`], default TTL when omitted |
//! | `del KEY...` | [`Cache::del`] |
//! | `not-found KEY` | [`Cache::set_not_found`] |
//! | `backends` | list registered backends |
//! | `config` | print the effective configuration as TOML |

use cachet_domain::Cache;
use cachet_domain::error::Result;
use cachet_domain::ports::list_cache_backends;
use cachet_infrastructure::CacheProvider;
use cachet_infrastructure::config::{AppConfig, ConfigLoader};
use cachet_infrastructure::error_ext::ErrorContext;
use cachet_infrastructure::logging::init_logging;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Command line interface for cachet
#[derive(Parser, Debug)]
#[command(name = "cachet")]
#[command(about = "Read and write a cachet cache from the command line")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Cache operations exposed on the command line
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the value stored under KEY
    Get {
        /// Logical key
        key: String,
    },

    /// Store a JSON value under KEY
    Set {
        /// Logical key
        key: String,

        /// Value as a JSON document
        #[arg(value_parser = parse_json)]
        value: Value,

        /// Time to live, e.g. `90s`, `10m`, `24h`; `0s` never expires
        #[arg(long, value_parser = humantime::parse_duration)]
        ttl: Option<Duration>,
    },

    /// Delete one or more keys
    Del {
        /// Logical keys
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Record KEY as absent upstream
    NotFound {
        /// Logical key
        key: String,
    },

    /// List registered backends
    Backends,

    /// Print the effective configuration
    Config,
}

fn parse_json(raw: &str) -> std::result::Result<Value, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Run a parsed command line to completion
///
/// `backends` and `config` do not touch a cache. Every other command builds
/// a provider from the loaded configuration, runs, and closes the provider
/// even when the operation failed.
pub async fn run(cli: Cli) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_deref())?;
    let mut out = std::io::stdout();

    match &cli.command {
        Command::Backends => {
            write_backends(&mut out)?;
            return Ok(());
        }
        Command::Config => {
            write_config(&config, &mut out)?;
            return Ok(());
        }
        _ => {}
    }

    init_logging(config.logging.clone())?;

    let provider = CacheProvider::new(config.cache)?;
    info!(backend = provider.cache().backend_name(), "Running cache command");

    let outcome = execute(&cli.command, provider.cache(), &mut out).await;
    provider.close().await?;
    outcome?;
    Ok(())
}

/// Load configuration from optional path
fn load_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

/// Run one cache command, writing its output to `out`
///
/// # Errors
/// * [`Error::Miss`](cachet_domain::Error::Miss) or
///   [`Error::Placeholder`](cachet_domain::Error::Placeholder) from `get`
/// * any backend or encoding error from the operation
pub async fn execute<W: Write + Send>(command: &Command, cache: &Cache, out: &mut W) -> Result<()> {
    match command {
        Command::Get { key } => {
            let value: Value = cache.get(key).await?;
            writeln!(out, "{value}").io_context("Failed to write value")?;
        }
        Command::Set { key, value, ttl } => {
            let ttl = ttl.unwrap_or_else(|| cache.default_ttl());
            cache.set(key, value, ttl).await?;
            debug!(key = %key, ttl = ?ttl, "Value stored");
            writeln!(out, "OK").io_context("Failed to write result")?;
        }
        Command::Del { keys } => {
            cache.del(keys.as_slice()).await?;
            writeln!(out, "OK").io_context("Failed to write result")?;
        }
        Command::NotFound { key } => {
            cache.set_not_found(key).await?;
            writeln!(out, "OK").io_context("Failed to write result")?;
        }
        Command::Backends => write_backends(out)?,
        Command::Config => {
            return Err(cachet_domain::Error::config(
                "The config command does not run against a cache",
            ));
        }
    }
    Ok(())
}

/// Write one line per registered backend
pub fn write_backends<W: Write>(out: &mut W) -> Result<()> {
    for (name, description) in list_cache_backends() {
        writeln!(out, "{name:<16}{description}").io_context("Failed to write backends")?;
    }
    Ok(())
}

/// Write `config` as TOML, with cache defaults filled in
pub fn write_config<W: Write>(config: &AppConfig, out: &mut W) -> Result<()> {
    let effective = AppConfig {
        cache: config.cache.clone().with_defaults(),
        logging: config.logging.clone(),
    };
    let rendered =
        toml::to_string_pretty(&effective).config_context("Failed to serialize config to TOML")?;
    out.write_all(rendered.as_bytes())
        .io_context("Failed to write config")
}
