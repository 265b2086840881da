//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Issue the forwarded request and hand back the raw response
//! - Never follow redirects: the caller inspects the raw status code
//! - Bound every call with the configured timeout

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{Method, Request, Response, Uri};
use hyper::body::Incoming;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tokio::time::timeout;

use crate::config::TimeoutConfig;
use crate::http::error::ProxyError;
use crate::routing::address::Target;

/// Client used for all upstream calls.
///
/// Cheap to clone; connections are pooled inside the hyper client.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    call_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            call_timeout: Duration::from_secs(timeouts.upstream_secs),
        }
    }

    /// Forward a request to the resolved target.
    ///
    /// GET carries no body; POST carries the buffered inbound body. The
    /// target is used exactly as decoded, so a malformed embedded host
    /// fails here as an [`ProxyError::InvalidTarget`] or network fault.
    pub async fn forward(
        &self,
        method: Method,
        target: &Target,
        body: Option<Bytes>,
    ) -> Result<Response<Incoming>, ProxyError> {
        let url = target.url();
        let uri: Uri = url.parse().map_err(|source| ProxyError::InvalidTarget {
            target: url.clone(),
            source,
        })?;

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(match body {
                Some(bytes) => Body::from(bytes),
                None => Body::empty(),
            })?;

        match timeout(self.call_timeout, self.client.request(request)).await {
            Ok(result) => result.map_err(ProxyError::Upstream),
            Err(_) => Err(ProxyError::UpstreamTimeout(self.call_timeout)),
        }
    }
}
