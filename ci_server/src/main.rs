//! Centrix CI Status Server.
//!
//! Serves pipeline badges and job step metrics from the entity stores.
//! Entities are loaded from a fixtures file into the in-memory store.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use centrix_ci_status::config::StatusConfig;
use centrix_ci_status::routes::{status_router, StatusRouterState};
use centrix_ci_status::store::MemoryStore;
use centrix_ci_status::{metrics, seeder};

#[derive(Parser)]
#[command(name = "centrix-ci-status", about = "Centrix CI badge and step metrics server")]
struct Cli {
    /// Server port
    #[arg(short, long, env = "CI_PORT", default_value = "9090")]
    port: u16,

    /// JSON fixtures to load into the in-memory store
    #[arg(long, env = "CI_FIXTURES")]
    fixtures: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    }

    let cli = Cli::parse();

    tracing::info!("Starting Centrix CI Status Server...");

    let config = StatusConfig::from_env()?;
    tracing::info!(
        badge_template = config.badge_template.as_str(),
        max_depth = config.reachability.max_depth,
        max_jobs = config.reachability.max_jobs,
        "Status config loaded"
    );

    // Seed the store before serving
    let store = Arc::new(MemoryStore::new());
    match &cli.fixtures {
        Some(path) => {
            seeder::seed_from_file(&store, path)?;
        }
        None => tracing::warn!("CI_FIXTURES not set -- serving an empty store"),
    }

    let state = StatusRouterState::in_memory(store, config);
    let app = status_router(state);

    // Initialize metrics
    metrics::init_metrics();

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    tracing::info!("Centrix CI Status Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
