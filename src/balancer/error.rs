//! Error taxonomy for the balancer.
//!
//! Two failure families with different propagation rules:
//! - [`ConfigError`]: fatal, raised at construction; the process must not
//!   start serving.
//! - [`ForwardError`]: per-request, caught at the forwarding boundary and
//!   converted to an HTTP status + short plain-text message. Never aborts
//!   the process or touches other in-flight requests.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Fatal construction error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least 2 backends are required for load balancing, got {count}")]
    NotEnoughBackends { count: usize },

    #[error("invalid backend URL {address:?}: {source}")]
    InvalidUrl {
        address: String,
        #[source]
        source: url::ParseError,
    },

    #[error("backend {address:?} must use http/https")]
    UnsupportedScheme { address: String },

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Per-request forwarding failure, classified.
///
/// 4xx/5xx responses from the backend are *not* errors; they are relayed
/// verbatim. These variants cover the cases where no upstream response
/// exists at all.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The outbound request could not be constructed.
    #[error("failed to build upstream request: {0}")]
    BadTarget(#[from] url::ParseError),

    /// The upstream call exceeded the configured timeout.
    #[error("upstream timed out after {elapsed:?}")]
    Timeout { elapsed: Duration },

    /// The upstream call failed (DNS, connection refused, reset, ...).
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        match self {
            ForwardError::BadTarget(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create request").into_response()
            }
            ForwardError::Timeout { elapsed } => (
                StatusCode::GATEWAY_TIMEOUT,
                format!("Backend request timed out after {}s", elapsed.as_secs()),
            )
                .into_response(),
            ForwardError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "Service temporarily unavailable",
            )
                .into_response(),
        }
    }
}
