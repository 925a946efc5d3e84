//! Observability subsystem.
//!
//! One structured log line per forwarded request (method, backend, status or
//! failure class, elapsed milliseconds) plus startup/shutdown events, all
//! through `tracing`.

pub mod logging;
