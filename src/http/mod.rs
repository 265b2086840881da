//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, dispatch, response translation)
//!     → routing layer resolves the forwarding target
//!     → upstream.rs (bounded hyper client call, no redirect following)
//!     → rewrite layer re-links the returned page
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod server;
pub mod upstream;

pub use error::ProxyError;
pub use request::MakeRequestUuid;
pub use server::HttpServer;
pub use upstream::UpstreamClient;
