//! Syft Datasets API
//!
//! REST API for browsing, searching and filtering datasets published in the
//! SyftBox ecosystem.
//!
//! Routes:
//! - `GET  /api/health`
//! - `GET  /api/ready`
//! - `GET  /api/v1/datasets`
//! - `POST /api/v1/datasets/search`
//! - `POST /api/v1/datasets/filter-by-email`
//! - `GET  /api/v1/datasets/emails`
//! - `GET  /api/v1/datasets/names`
//!
//! Anything else falls through to the static frontend when one is configured.

use axum::{
    http::{request::Parts, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use syft_datasets_source::DynDatasetSource;

pub mod config;
pub mod datasets;
pub mod error;
pub mod health;
pub mod views;

#[cfg(feature = "metrics")]
pub mod metrics;

pub use config::Settings;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use health::{run_startup_probe, Readiness};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<DynDatasetSource>,
    pub readiness: Readiness,
}

impl AppState {
    pub fn new(source: Arc<DynDatasetSource>) -> Self {
        Self {
            source,
            readiness: Readiness::default(),
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    let v1 = Router::new()
        .route("/datasets", get(datasets::list_datasets))
        .route("/datasets/search", post(datasets::search_datasets))
        .route(
            "/datasets/filter-by-email",
            post(datasets::filter_datasets_by_email),
        )
        .route("/datasets/emails", get(datasets::list_unique_emails))
        .route("/datasets/names", get(datasets::list_unique_names));

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/v1", v1);

    let mut app = Router::new().nest("/api", api);

    #[cfg(feature = "metrics")]
    {
        app = app
            .route("/metrics", get(metrics::metrics_handler))
            .layer(axum::middleware::from_fn(metrics::track_metrics));
    }

    if settings.static_dir.is_dir() {
        tracing::info!("Serving frontend from {}", settings.static_dir.display());
        app = app.fallback_service(ServeDir::new(&settings.static_dir));
    } else {
        tracing::debug!(
            "Static directory {} not found, frontend disabled",
            settings.static_dir.display()
        );
    }

    app = app.layer(TraceLayer::new_for_http());

    if settings.debug {
        app = app.layer(local_cors_layer());
    }

    app.with_state(state)
}

/// CORS for local frontend development servers on any port.
fn local_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _: &Parts| origin.to_str().map(is_local_origin).unwrap_or(false),
        ))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// `http://localhost:<port>` or `http://127.0.0.1:<port>`
fn is_local_origin(origin: &str) -> bool {
    let Some(rest) = origin.strip_prefix("http://") else {
        return false;
    };
    let port = rest
        .strip_prefix("localhost:")
        .or_else(|| rest.strip_prefix("127.0.0.1:"));
    matches!(port, Some(p) if !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
