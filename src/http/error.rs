//! Per-request error taxonomy.
//!
//! # Design Decisions
//! - Every variant is fatal for its own request only; the listener survives
//!   all of them and keeps accepting connections
//! - No retries anywhere
//! - Errors surface as terminal 400/502 responses, never as a 200 or 302

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure of a single proxied request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// POST arrived without a parsable `content-length` header.
    #[error("POST request without a valid content-length header")]
    InvalidContentLength,

    /// The inbound body could not be read in full.
    #[error("failed to read request body: {0}")]
    RequestBody(#[source] axum::Error),

    /// The decoded target did not form a usable URL. Reached through
    /// malformed `/proxy:` paths, which are forwarded unvalidated.
    #[error("invalid upstream target {target:?}: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: axum::http::uri::InvalidUri,
    },

    /// Building an HTTP message failed.
    #[error("failed to build HTTP message: {0}")]
    Http(#[from] axum::http::Error),

    /// Network-level failure reaching the upstream.
    #[error("upstream request failed: {0}")]
    Upstream(#[source] hyper_util::client::legacy::Error),

    /// The upstream did not answer within the configured bound.
    #[error("upstream request timed out after {0:?}")]
    UpstreamTimeout(Duration),

    /// The upstream response body could not be read in full.
    #[error("failed to read upstream response body: {0}")]
    UpstreamBody(#[source] axum::Error),

    /// The upstream answered with a status outside {200, 302}.
    #[error("unsupported upstream response: {0}")]
    UnsupportedStatus(StatusCode),
}

impl ProxyError {
    /// Status reported to the client. Faults in the inbound request map to
    /// 400, everything upstream-side to 502.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidContentLength | ProxyError::RequestBody(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (self.status(), self.to_string()).into_response()
    }
}
