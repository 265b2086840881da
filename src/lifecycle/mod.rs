//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Parse args → Resolve config → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or coordinator trigger → Stop accepting → Drain → Exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
