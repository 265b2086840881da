//! Configuration resolution from file, environment and arguments.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "spark-ui-proxy")]
#[command(about = "Expose a cluster dashboard UI through a single host", long_about = None)]
pub struct CliArgs {
    /// Proxied master address as host:port
    pub upstream: String,

    /// Listen port; overrides SERVER_PORT
    pub port: Option<u16>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid port value {0:?}")]
    InvalidPort(String),

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and parse a TOML configuration file.
pub fn load_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Resolve the effective configuration.
///
/// Precedence: built-in defaults < config file < environment < arguments.
pub fn from_sources(args: &CliArgs) -> Result<ProxyConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_file(path)?,
        None => ProxyConfig::default(),
    };

    apply_overrides(
        &mut config,
        env::var("BIND_ADDR").ok(),
        env::var("SERVER_PORT").ok(),
        args,
    )?;

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment and argument overrides onto a base configuration.
fn apply_overrides(
    config: &mut ProxyConfig,
    bind_addr: Option<String>,
    server_port: Option<String>,
    args: &CliArgs,
) -> Result<(), ConfigError> {
    if let Some(addr) = bind_addr {
        config.listener.bind_address = addr;
    }

    if let Some(port) = server_port {
        config.listener.port = port
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port))?;
    }

    config.upstream.default_host = args.upstream.clone();
    if let Some(port) = args.port {
        config.listener.port = port;
    }

    Ok(())
}
