//! HTTP service host.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum catch-all route)
//!     → Balancer::forward (selection, dispatch, relay)
//!     → response or classified failure back to the client
//! ```

pub mod server;

pub use server::HttpServer;
