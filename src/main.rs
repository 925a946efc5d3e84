//! Round-robin HTTP load balancer.
//!
//! Startup order: logging → config → balancer → listener → signal task →
//! serve. Construction and bind failures are fatal and exit non-zero before
//! any traffic is accepted; after that, per-request failures never escape
//! their own request.

use std::sync::Arc;

use tokio::net::TcpListener;

use load_balancer::{balancer::Balancer, config::Config, http::HttpServer, lifecycle};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_balancer::observability::logging::init();

    let config = Config::from_env();

    let balancer = Arc::new(Balancer::new(&config.backends, config.upstream_timeout)?);

    tracing::info!(bind_address = %config.bind_address, "Load balancer starting");
    for (index, backend) in config.backends.iter().enumerate() {
        tracing::info!(index = index + 1, backend = %backend, "Backend configured");
    }

    let listener = TcpListener::bind(&config.bind_address).await?;

    let shutdown = Arc::new(lifecycle::Shutdown::new());
    let signal_shutdown = Arc::clone(&shutdown);
    tokio::spawn(async move {
        lifecycle::signals::wait_for_termination().await;
        signal_shutdown.trigger();
    });

    HttpServer::new(balancer).run(listener, &shutdown).await?;

    tracing::info!("Server stopped. Goodbye!");
    Ok(())
}
