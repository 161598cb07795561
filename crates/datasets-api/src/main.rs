//! Syft Datasets API Server
//!
//! Serves the dataset browsing API and, when built, the frontend.

use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use syft_datasets_api::{build_router, run_startup_probe, AppState, Settings};
use syft_datasets_source::source_from_kind;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let settings = Settings::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.default_log_filter())),
        )
        .init();

    tracing::info!(
        version = syft_datasets_api::config::APP_VERSION,
        source = %settings.source,
        debug = settings.debug,
        "Starting Syft-Datasets API"
    );

    let source = source_from_kind(settings.source, settings.config_path.clone()).unwrap_or_else(|e| {
        tracing::error!("Failed to create dataset source: {}", e);
        std::process::exit(1);
    });

    let state = AppState::new(Arc::from(source));
    run_startup_probe(state.source.as_ref(), &state.readiness).await;

    let app = build_router(state, &settings);

    let addr = settings.addr();
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap_or_else(|e| {
        tracing::error!("Failed to bind {}: {}", addr, e);
        std::process::exit(1);
    });
    tracing::info!("Syft-Datasets API listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
