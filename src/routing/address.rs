//! Path codec for the `/proxy:` addressing convention.

/// Marker prefix carrying an embedded target host.
pub const PROXY_MARKER: &str = "/proxy:";

/// Resolved forwarding target for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Host (and optional port) the request is forwarded to.
    pub host: String,

    /// Path forwarded to the host, including any query string. Empty when
    /// the addressed path named only a host.
    pub path: String,
}

impl Target {
    /// Full target URL for the upstream call.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.host, self.path)
    }
}

/// Split a raw request path into its forwarding target.
///
/// `/proxy:<host>/<rest>` addresses `<host>` directly; the host ends at the
/// first `/` after the marker, or at the end of the path if none. Anything
/// else resolves against `default_host` with the path left untouched.
pub fn decode_path(path: &str, default_host: &str) -> Target {
    match path.strip_prefix(PROXY_MARKER) {
        Some(addressed) => match addressed.find('/') {
            Some(idx) => Target {
                host: addressed[..idx].to_string(),
                path: addressed[idx..].to_string(),
            },
            None => Target {
                host: addressed.to_string(),
                path: String::new(),
            },
        },
        None => Target {
            host: default_host.to_string(),
            path: path.to_string(),
        },
    }
}

/// Re-embed a host into an addressed path.
pub fn encode_host(host: &str) -> String {
    format!("{PROXY_MARKER}{host}")
}
