//! Request addressing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path ("/proxy:worker-2:8081/logPage?appId=app-3")
//!     → address.rs (strip marker, extract embedded host)
//!     → Target { host, path }
//!     → http layer builds "http://<host><path>" and forwards
//! ```
//!
//! # Design Decisions
//! - The embedded host ends at the first '/' after the marker, or at the
//!   end of the path if none
//! - No hostname validation: a garbage host fails at the client layer,
//!   surfacing as a per-request forwarding error
//! - Paths without the marker resolve against the default upstream host,
//!   unchanged

pub mod address;

pub use address::{decode_path, encode_host, Target, PROXY_MARKER};
