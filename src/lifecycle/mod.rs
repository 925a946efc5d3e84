//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! signals.rs:
//!     SIGTERM/SIGINT → trigger Shutdown
//!
//! shutdown.rs:
//!     Shutdown triggered → listener stops accepting → in-flight requests
//!     drain (bounded) → process exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
