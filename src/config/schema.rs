//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the dashboard proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Upstream addressing (default host, internal master address).
    pub upstream: UpstreamConfig,

    /// Listener configuration (bind address, port).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Body buffering limits.
    pub limits: LimitsConfig,
}

/// Upstream addressing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Default upstream host as `host:port`. Requests whose path carries no
    /// embedded target resolve against this host; it is the cluster master.
    pub default_host: String,

    /// Address string the dashboard prints for its own master (the name it
    /// is reachable under inside the cluster network). Every occurrence in
    /// a proxied page is replaced by `default_host`.
    pub master_address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            default_host: String::new(),
            master_address: "spark-master:8080".to_string(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0"). Overridable via `BIND_ADDR`.
    pub bind_address: String,

    /// Listen port. Overridable via `SERVER_PORT` or the second positional
    /// argument.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 80,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream call timeout in seconds. Bounds a single forwarded request
    /// so a hung upstream cannot pin its task forever.
    pub upstream_secs: u64,

    /// Whole-request timeout (inbound side) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_secs: 30,
            request_secs: 60,
        }
    }
}

/// Body buffering limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum bytes buffered for a request or response body. Dashboard
    /// pages are small; log pages can be large.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ProxyConfig {
    /// Address string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.bind_address, self.listener.port)
    }
}
