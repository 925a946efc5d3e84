//! HTTP server setup and shutdown coordination.
//!
//! # Responsibilities
//! - Build the axum router: every method and path goes to the proxy handler
//! - Serve connections until a shutdown trigger arrives
//! - Drain: stop accepting immediately, give in-flight requests a bounded
//!   grace period, abort whatever is still running when it elapses
//!
//! The lifecycle is a three-state machine: Running → Draining → Stopped.
//! Draining starts on the shutdown trigger (or a fatal listener error, which
//! instead surfaces to the caller); Stopped follows when the server has
//! drained or the grace period runs out, whichever comes first.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::balancer::Balancer;
use crate::lifecycle::Shutdown;

/// How long in-flight requests get to finish once draining starts.
pub const DRAIN_GRACE: Duration = Duration::from_secs(5);

/// Application state injected into the proxy handler.
#[derive(Clone)]
struct AppState {
    balancer: Arc<Balancer>,
}

/// HTTP server front-ending the balancer.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server routing every request into the given balancer.
    pub fn new(balancer: Arc<Balancer>) -> Self {
        let state = AppState { balancer };
        let router = Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());
        Self { router }
    }

    /// Serve connections on the listener until shutdown completes.
    ///
    /// Returns when the server has stopped — cleanly drained, grace period
    /// expired, or the listener failed irrecoverably (the error case).
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: &Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server listening");

        let mut stop_accepting = shutdown.subscribe();
        let mut drain_started = shutdown.subscribe();

        let serve = axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = stop_accepting.recv().await;
                tracing::info!("Shutting down gracefully...");
            });

        let drain_deadline = async move {
            let _ = drain_started.recv().await;
            tokio::time::sleep(DRAIN_GRACE).await;
        };

        tokio::select! {
            result = serve => {
                result?;
                tracing::info!("Server stopped cleanly");
            }
            _ = drain_deadline => {
                // Dropping the serve future aborts remaining requests.
                tracing::warn!(
                    grace_secs = DRAIN_GRACE.as_secs(),
                    "Drain grace period elapsed, aborting in-flight requests"
                );
            }
        }
        Ok(())
    }
}

/// Catch-all proxy handler: delegate to the balancer, convert failures to
/// their HTTP representation at this boundary.
async fn proxy_handler(State(state): State<AppState>, request: Request) -> Response {
    match state.balancer.forward(request).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
