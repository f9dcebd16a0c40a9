//! Payment API Gateway (v1)
//!
//! Forwards browser requests to a single upstream API, injecting a bearer
//! credential and resolving `{id}` payment sub-resources.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser ──▶ axum router ──▶ handlers ──▶ Forwarder ──▶ Upstream API
//!                  │ request id                 │ template
//!                  │ trace / cors               │ bearer token
//!                  │ limits / timeout           │ outbound timeout
//!     Browser ◀── response.rs ◀── ForwardOutcome ◀──────────┘
//! ```

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;

use payment_gateway::config::{load_from_env, log_level, GatewayConfig, SystemEnv};
use payment_gateway::lifecycle::Shutdown;
use payment_gateway::observability::{logging, metrics};
use payment_gateway::HttpServer;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init(&log_level(&SystemEnv));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "payment-gateway starting");

    let config = match load_from_env(&SystemEnv) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!(error = %e, "Configuration error, refusing to start");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Gateway terminated with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Arc<GatewayConfig>) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        api_url = %config.upstream.api_url,
        payment_template = %config.upstream.payment_template,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        environment = %config.environment,
        log_level = %config.observability.log_level,
        "Configuration loaded"
    );

    if let Some(address) = &config.observability.metrics_address {
        let addr: SocketAddr = address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let server = HttpServer::new(config.clone())?;

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    server.run(listener, server_shutdown).await?;
    Ok(())
}
