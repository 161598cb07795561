//! Health Check Module
//!
//! - `/api/health` - Liveness: always healthy while the process runs
//! - `/api/ready` - Readiness: result of the startup probe against the dataset source
//!
//! The startup probe runs once, before the server starts accepting traffic.
//! It logs who the SyftBox client is logged in as and how many datasets were
//! found, then records the outcome in [`Readiness`].

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use syft_datasets_core::Result;
use syft_datasets_source::{DynDatasetSource, SourceKind};

use crate::AppState;

/// Health status enumeration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Readiness response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    /// Source variant in use (`live` or `demo`)
    pub source: String,
    pub message: String,
}

/// Readiness flag set by the startup probe
#[derive(Debug, Clone, Default)]
pub struct Readiness(Arc<AtomicBool>);

impl Readiness {
    pub fn is_ready(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, ready: bool) {
        self.0.store(ready, Ordering::Release);
    }
}

/// Liveness probe. Independent of the dataset source.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        message: "Syft-Datasets API is running".to_string(),
        timestamp: Utc::now(),
    })
}

/// Readiness probe - reports the outcome of the startup probe
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.is_ready();
    let (status, status_code, message) = if ready {
        (HealthStatus::Healthy, StatusCode::OK, "Service is ready")
    } else {
        (
            HealthStatus::Unhealthy,
            StatusCode::SERVICE_UNAVAILABLE,
            "Dataset source failed to initialize",
        )
    };

    (
        status_code,
        Json(ReadinessResponse {
            status,
            source: state.source.kind().to_string(),
            message: message.to_string(),
        }),
    )
}

/// Probe the dataset source once and record the result.
///
/// Failures are logged, never fatal: requests keep going to the source and
/// fail individually until it becomes reachable.
pub async fn run_startup_probe(source: &DynDatasetSource, readiness: &Readiness) -> bool {
    if source.kind() == SourceKind::Demo {
        tracing::warn!("Serving demo fixture data; no SyftBox datasets will be discovered");
    }

    match probe(source).await {
        Ok(count) => {
            tracing::info!(count, "Loaded {} datasets from {} source", count, source.kind());
            readiness.set(true);
            true
        }
        Err(e) => {
            tracing::error!("Failed to initialize SyftBox connection: {}", e);
            tracing::error!("Make sure SyftBox is installed and you're logged in");
            readiness.set(false);
            false
        }
    }
}

async fn probe(source: &DynDatasetSource) -> Result<usize> {
    if let Some(identity) = source.identity().await? {
        tracing::info!("SyftBox filesystem accessible, logged in as: {}", identity.email);
        tracing::info!("SyftBox app running at {}", identity.client_url);
    }
    Ok(source.load().await?.len())
}
