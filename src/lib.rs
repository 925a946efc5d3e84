//! Round-robin HTTP load balancer library.
//!
//! Two components, composed linearly: the [`balancer`] core owns the backend
//! pool, the selection cursor, and the upstream client; the [`http`] service
//! host binds the listener, routes every request into the core, and
//! coordinates graceful shutdown.

pub mod balancer;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use balancer::{Balancer, ConfigError, ForwardError};
pub use config::Config;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
