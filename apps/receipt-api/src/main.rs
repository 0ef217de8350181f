//! # Receipt API Server
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Server Startup                                  │
//! │                                                                         │
//! │  1. Initialize logging (RUST_LOG, default: info)                        │
//! │  2. Parse flags / environment into ApiConfig                            │
//! │  3. Build router over an empty ReceiptStore                             │
//! │  4. Serve on 0.0.0.0:PORT until Ctrl+C or SIGTERM                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use receipt_api::{build_router, ApiConfig, AppState, VERSION};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = ApiConfig::parse();
    config.validate()?;

    let addr = config.bind_addr();
    info!(
        %addr,
        environment = %config.environment,
        version = VERSION,
        request_timeout_secs = config.request_timeout_secs,
        max_body_bytes = config.max_body_bytes,
        "Configuration loaded"
    );

    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Starting receipt API server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
