//! Balancer core: backend selection and request forwarding.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → next_backend() (atomic round-robin cursor)
//!     → rebuild method/path/query onto the backend, stream body through
//!     → shared pooled client, bounded by the per-request timeout
//!     → relay status/headers/body, or classify the failure (500/502/504)
//! ```
//!
//! # Design Decisions
//! - Pure round-robin: no health, load, or latency awareness; a failing
//!   backend keeps receiving its share of traffic
//! - No retries: a request is dispatched to exactly one backend
//! - Bodies are streamed end to end, never buffered in memory

pub mod backend;
pub mod error;
pub mod headers;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::Request,
    response::Response,
};

pub use backend::Backend;
pub use error::{ConfigError, ForwardError};

/// Default per-request upstream timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// Upstream connection pool bounds.
const POOL_MAX_IDLE_PER_HOST: usize = 30;
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const TCP_KEEPALIVE: Duration = Duration::from_secs(10);

/// Round-robin request forwarder over a fixed backend pool.
///
/// Constructed once at startup and shared by every request handler. The
/// selection cursor is the only mutable state; it is advanced with an atomic
/// fetch-add so concurrent callers never observe the same cursor value.
#[derive(Debug)]
pub struct Balancer {
    /// Ordered backend pool; length ≥ 2, fixed for the process lifetime.
    backends: Vec<Backend>,
    /// Monotonic selection cursor, wrapped modulo the backend count at read.
    cursor: AtomicUsize,
    /// Shared upstream client with a bounded idle-connection pool.
    client: reqwest::Client,
    /// Per-request upstream timeout.
    timeout: Duration,
}

impl Balancer {
    /// Build a balancer from backend address strings.
    ///
    /// Requires at least two syntactically valid http/https URLs; backend
    /// order matches input order. `timeout` overrides [`DEFAULT_TIMEOUT`].
    pub fn new(addresses: &[String], timeout: Option<Duration>) -> Result<Self, ConfigError> {
        if addresses.len() < 2 {
            return Err(ConfigError::NotEnoughBackends {
                count: addresses.len(),
            });
        }

        let backends = addresses
            .iter()
            .map(|address| Backend::parse(address))
            .collect::<Result<Vec<_>, _>>()?;

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .tcp_keepalive(TCP_KEEPALIVE)
            .build()?;

        Ok(Self {
            backends,
            cursor: AtomicUsize::new(0),
            client,
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }

    /// Number of configured backends.
    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// Select the next backend in round-robin order.
    ///
    /// Each call takes a distinct, strictly-increasing cursor value, so
    /// concurrent callers cycle through all backends with no skips and no
    /// duplicate assignment of the same slot.
    pub fn next_backend(&self) -> &Backend {
        let current = self.cursor.fetch_add(1, Ordering::Relaxed);
        &self.backends[current % self.backends.len()]
    }

    /// Forward an inbound request to the next backend and relay the result.
    ///
    /// Any response from the backend — 4xx/5xx included — is a success and
    /// is relayed verbatim. Errors cover only the cases where no upstream
    /// response exists; they are converted to 500/502/504 at the service
    /// boundary.
    pub async fn forward(&self, request: Request) -> Result<Response, ForwardError> {
        let backend = self.next_backend();

        let (parts, body) = request.into_parts();
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let url = backend.target_url(path_and_query).map_err(|err| {
            tracing::error!(
                backend = %backend.host(),
                path = path_and_query,
                error = %err,
                "failed to build upstream request"
            );
            ForwardError::BadTarget(err)
        })?;

        let method = parts.method.clone();
        let mut outbound = reqwest::Request::new(parts.method, url);
        *outbound.headers_mut() = headers::request_headers(&parts.headers);
        *outbound.body_mut() = Some(reqwest::Body::wrap_stream(body.into_data_stream()));
        // Per-request deadline: covers the call through body completion, so
        // a backend that sends headers and then stalls cannot hold the relay
        // open past the timeout.
        *outbound.timeout_mut() = Some(self.timeout);

        let start = Instant::now();
        let result = self.client.execute(outbound).await;
        let elapsed = start.elapsed();

        let upstream = match result {
            Err(err) if err.is_timeout() => {
                tracing::warn!(
                    method = %method,
                    backend = %backend.host(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "upstream timed out"
                );
                return Err(ForwardError::Timeout { elapsed });
            }
            Err(err) => {
                tracing::error!(
                    method = %method,
                    backend = %backend.host(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %err,
                    "upstream request failed"
                );
                return Err(ForwardError::Upstream(err));
            }
            Ok(upstream) => upstream,
        };

        let status = upstream.status();
        tracing::info!(
            method = %method,
            backend = %backend.host(),
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "request forwarded"
        );

        let relayed_headers = headers::response_headers(upstream.headers());
        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = relayed_headers;
        Ok(response)
    }
}
