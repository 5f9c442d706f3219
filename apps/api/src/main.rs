//! # Storefront API
//!
//! HTTP server in front of the in-memory store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront API                                  │
//! │                                                                         │
//! │  Client ───► axum (8080) ───► handlers ───► MemoryStore (one lock)     │
//! │                                                                         │
//! │  Everything lives in memory: a restart wipes carts, orders and         │
//! │  discount codes. That is the deal.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (`RUST_LOG` override, default `info`)
//! 2. Load configuration from environment variables
//! 3. Construct the store with the configured discount interval
//! 4. Bind and serve until ctrl-c / SIGTERM

mod config;
mod error;
mod routes;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_core::MemoryStore;

use crate::config::ServerConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Storefront API server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        nth_order_discount = config.nth_order_discount,
        "Configuration loaded"
    );

    // Create shared state; the store is the only stateful thing here
    let state = Arc::new(AppState {
        store: MemoryStore::new(config.nth_order_discount),
    });

    // Build the router and bind
    let app = routes::router(state);
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");

    // Serve until a shutdown signal arrives
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_api=debug` - Debug for this crate only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
