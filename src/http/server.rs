//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router and wire middleware (request ID, trace, timeout)
//! - Dispatch GET/POST; shortcut the root path to the canonical redirect
//! - Resolve the forwarding target from the request path
//! - Translate upstream responses: rewrite 200 bodies, canonicalize 302s,
//!   fail the request for anything else

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::error::ProxyError;
use crate::http::request::MakeRequestUuid;
use crate::http::upstream::UpstreamClient;
use crate::rewrite::{rewrite_links, RewriteContext};
use crate::routing::address::{decode_path, encode_host};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: UpstreamClient,
}

/// HTTP server for the dashboard proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let upstream = UpstreamClient::new(&config.timeouts);
        let state = AppState {
            config: Arc::new(config),
            upstream,
        };
        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let request_secs = state.config.timeouts.request_secs;
        Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(request_secs)))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server until a shutdown trigger or Ctrl+C arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler: dispatch one inbound request.
///
/// Per-request failures convert into terminal 400/502 responses; the
/// listener itself is never affected.
async fn proxy_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let method = request.method().clone();
    let raw_path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("")
        .to_string();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %raw_path,
        "dispatching request"
    );

    if method == Method::GET {
        // The canonical entry point: hitting the home page never forwards.
        if raw_path.is_empty() || raw_path == "/" {
            return canonical_redirect(&state.config.upstream.default_host);
        }
        forward_and_translate(&state, &request_id, Method::GET, &raw_path, None).await
    } else if method == Method::POST {
        let body = read_post_body(&state, request).await?;
        forward_and_translate(&state, &request_id, Method::POST, &raw_path, Some(body)).await
    } else {
        Ok(StatusCode::METHOD_NOT_ALLOWED.into_response())
    }
}

/// Buffer a POST body in full.
///
/// The declared `content-length` must be present and parsable; the read
/// itself is bounded by the configured body limit.
async fn read_post_body(state: &AppState, request: Request<Body>) -> Result<Bytes, ProxyError> {
    let declared = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .ok_or(ProxyError::InvalidContentLength)?;

    tracing::debug!(content_length = declared, "buffering POST body");

    axum::body::to_bytes(request.into_body(), state.config.limits.max_body_bytes)
        .await
        .map_err(ProxyError::RequestBody)
}

/// Forward one request to its decoded target and translate the outcome.
async fn forward_and_translate(
    state: &AppState,
    request_id: &str,
    method: Method,
    raw_path: &str,
    body: Option<Bytes>,
) -> Result<Response, ProxyError> {
    let config = &state.config;
    let target = decode_path(raw_path, &config.upstream.default_host);

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %raw_path,
        host = %target.host,
        upstream_path = %target.path,
        target_url = %target.url(),
        "proxying request"
    );

    let response = state.upstream.forward(method, &target, body).await?;
    let status = response.status();

    if status == StatusCode::OK {
        let bytes = axum::body::to_bytes(
            Body::new(response.into_body()),
            config.limits.max_body_bytes,
        )
        .await
        .map_err(ProxyError::UpstreamBody)?;
        relay_page(bytes, &target.host, config)
    } else if status == StatusCode::FOUND {
        // The upstream's own Location is discarded: every redirect resets
        // to the canonical entry point for the default host.
        canonical_redirect(&config.upstream.default_host)
    } else {
        Err(ProxyError::UnsupportedStatus(status))
    }
}

/// Relay a fetched page, re-linking it through the proxy.
///
/// No upstream headers are propagated. Bodies that are not valid UTF-8
/// (images, archived logs) pass through untouched.
fn relay_page(bytes: Bytes, target_host: &str, config: &ProxyConfig) -> Result<Response, ProxyError> {
    let body = match std::str::from_utf8(&bytes) {
        Ok(page) => {
            let ctx = RewriteContext {
                target_host,
                default_host: &config.upstream.default_host,
                master_address: &config.upstream.master_address,
            };
            Body::from(rewrite_links(page, &ctx))
        }
        Err(_) => Body::from(bytes),
    };

    Ok(axum::http::Response::builder()
        .status(StatusCode::OK)
        .body(body)?)
}

/// 302 to the canonical entry point for the default upstream host.
fn canonical_redirect(default_host: &str) -> Result<Response, ProxyError> {
    Ok(axum::http::Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, encode_host(default_host))
        .body(Body::empty())?)
}

/// Resolves on Ctrl+C or when the shutdown coordinator fires.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(error) = result {
                tracing::error!(error = %error, "failed to install Ctrl+C handler");
            }
        }
        _ = shutdown.recv() => {}
    }
    tracing::info!("shutdown signal received");
}
