//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the upstream host can be embedded in an addressed path
//! - Validate value ranges (port, timeouts)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("upstream host must not be empty")]
    EmptyUpstreamHost,

    /// The addressed-path convention ends the embedded host at the first
    /// '/', so a host containing one can never round-trip.
    #[error("upstream host must not contain '/': {0}")]
    UpstreamHostContainsSlash(String),

    #[error("listen port must not be 0")]
    ZeroListenPort,

    #[error("upstream timeout must not be 0")]
    ZeroUpstreamTimeout,
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let host = &config.upstream.default_host;
    if host.is_empty() {
        errors.push(ValidationError::EmptyUpstreamHost);
    } else if host.contains('/') {
        errors.push(ValidationError::UpstreamHostContainsSlash(host.clone()));
    }

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroListenPort);
    }

    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroUpstreamTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
