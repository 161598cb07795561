//! Prometheus metrics for the Syft Datasets API
//!
//! Only compiled with the `metrics` feature.
//!
//! Exposed metrics:
//! - `http_requests_total{method, route, status}`
//! - `http_request_duration_seconds{method, route}`
//! - `syft_datasets_source_loads_total{source, outcome}`: one per collection load,
//!   `outcome` is `success`, `unavailable` or `internal`
//! - `syft_datasets_source_load_duration_seconds{source}`
//! - `syft_datasets_returned{operation}`: datasets per list/search/filter response

use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};
use std::time::{Duration, Instant};

use syft_datasets_source::SourceKind;

/// Route label for requests that matched no route (static files, 404s).
pub const UNMATCHED_ROUTE: &str = "<unmatched>";

lazy_static! {
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "route", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request latency in seconds",
        &["method", "route"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .unwrap();

    /// Collection loads by source variant and outcome
    pub static ref SOURCE_LOADS_TOTAL: CounterVec = register_counter_vec!(
        "syft_datasets_source_loads_total",
        "Dataset collection loads by source and outcome",
        &["source", "outcome"]
    )
    .unwrap();

    pub static ref SOURCE_LOAD_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "syft_datasets_source_load_duration_seconds",
        "Time spent loading the dataset collection",
        &["source"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    )
    .unwrap();

    pub static ref DATASETS_RETURNED: HistogramVec = register_histogram_vec!(
        "syft_datasets_returned",
        "Number of datasets in list, search and filter responses",
        &["operation"],
        vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 1000.0]
    )
    .unwrap();
}

/// Label for the route a request was dispatched to.
///
/// Raw paths are never used, so the number of series stays bounded by the
/// router's routes.
pub fn route_label(matched: Option<&MatchedPath>) -> &str {
    matched.map(MatchedPath::as_str).unwrap_or(UNMATCHED_ROUTE)
}

/// Axum middleware to track HTTP request metrics
pub async fn track_metrics(req: Request, next: Next) -> impl IntoResponse {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = route_label(req.extensions().get::<MatchedPath>()).to_string();

    let response = next.run(req).await;
    let status = response.status().as_u16().to_string();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &route, &status])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &route])
        .observe(start.elapsed().as_secs_f64());

    response
}

/// Handler for the `/metrics` endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let mut buffer = vec![];

    match encoder.encode(&prometheus::gather(), &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [("content-type", encoder.format_type())],
            buffer,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {}", e),
        )
            .into_response(),
    }
}

/// Record one collection load.
pub fn record_source_load(source: SourceKind, outcome: &str, elapsed: Duration) {
    let source = source.to_string();
    SOURCE_LOADS_TOTAL
        .with_label_values(&[&source, outcome])
        .inc();
    SOURCE_LOAD_DURATION_SECONDS
        .with_label_values(&[&source])
        .observe(elapsed.as_secs_f64());
}

/// Record the size of a list/search/filter response.
pub fn record_datasets_returned(operation: &str, count: usize) {
    DATASETS_RETURNED
        .with_label_values(&[operation])
        .observe(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_label_without_match() {
        assert_eq!(route_label(None), UNMATCHED_ROUTE);
    }

    #[test]
    fn test_source_load_outcomes_are_separate_series() {
        record_source_load(SourceKind::Demo, "success", Duration::from_millis(1));
        record_source_load(SourceKind::Live, "unavailable", Duration::from_millis(2));

        assert!(
            SOURCE_LOADS_TOTAL
                .with_label_values(&["demo", "success"])
                .get()
                >= 1.0
        );
        assert!(
            SOURCE_LOADS_TOTAL
                .with_label_values(&["live", "unavailable"])
                .get()
                >= 1.0
        );
    }

    #[test]
    fn test_datasets_returned_observes_counts() {
        record_datasets_returned("unit_test", 0);
        record_datasets_returned("unit_test", 7);

        let histogram = DATASETS_RETURNED.with_label_values(&["unit_test"]);
        assert_eq!(histogram.get_sample_count(), 2);
        assert_eq!(histogram.get_sample_sum(), 7.0);
    }
}
