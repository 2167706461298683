//! AI Tools Directory — HTTP service
//!
//! Serves the public tool directory from the embedded seed catalog and an
//! admin API where each logged-in administrator edits a private working copy.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod admin;
mod config;
mod console;
mod error;
mod public;
mod server;
mod session;
mod state;

use aitools_catalog::SeedData;

fn init_tracing(logging: &config::LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    info!("AI Tools Directory starting...");

    let seed = SeedData::load().context("Failed to load seed data")?;
    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .context("Invalid bind address")?;
    let session_ttl = chrono::Duration::minutes(config.admin.session_ttl_minutes as i64);
    let sweep_interval = Duration::from_secs(config.admin.sweep_interval_seconds.max(1));

    let app_state = state::AppState::new(seed, config);
    let cancel = CancellationToken::new();

    let sweeper = tokio::spawn(state::run_session_sweeper(
        app_state.site.clone(),
        session_ttl,
        sweep_interval,
        cancel.clone(),
    ));

    let app = server::build_router(app_state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Directory listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    cancel.cancel();
    if let Err(e) = sweeper.await {
        warn!("Session sweeper ended abnormally: {e}");
    }
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received terminate signal, shutting down..."),
    }
}
