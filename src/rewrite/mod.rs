//! Link rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! Fetched page (HTML from the target host)
//!     → rules.rs (ordered literal replacements)
//!     → every href/src/action routes back through the proxy
//! ```
//!
//! # Design Decisions
//! - Literal substring replacement, no DOM parse: the dashboard's markup is
//!   regular enough that six fixed rules cover every link it emits
//! - Rules apply in a fixed order; no pattern is a prefix of another, so no
//!   occurrence is rewritten twice

pub mod rules;

pub use rules::{rewrite_links, RewriteContext};
