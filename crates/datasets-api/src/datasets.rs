//! Dataset endpoints
//!
//! Every handler loads a fresh collection from the configured source, runs a
//! read-only query over it and returns the assembled view.

use axum::{extract::State, Json};

use syft_datasets_core::{DatasetCollection, DatasetError};

use crate::error::ApiResult;
use crate::views::{FilterByEmailRequest, ListDatasetsResponse, SearchDatasetsRequest};
use crate::AppState;

/// Failure category of a collection load, as reported in logs and metrics.
pub fn failure_category(error: &DatasetError) -> &'static str {
    if error.is_unavailable() {
        "unavailable"
    } else {
        "internal"
    }
}

/// Load the current collection, logging failures against `operation`.
async fn load_collection(state: &AppState, operation: &str) -> ApiResult<DatasetCollection> {
    #[cfg(feature = "metrics")]
    let start = std::time::Instant::now();

    let result = state.source.load().await;

    #[cfg(feature = "metrics")]
    crate::metrics::record_source_load(
        state.source.kind(),
        result.as_ref().map_or_else(failure_category, |_| "success"),
        start.elapsed(),
    );

    result.map_err(|e| {
        tracing::error!(
            operation,
            source = %state.source.kind(),
            category = failure_category(&e),
            error = %e,
            "Dataset operation failed"
        );
        e.into()
    })
}

fn respond(operation: &str, collection: &DatasetCollection) -> Json<ListDatasetsResponse> {
    let response = ListDatasetsResponse::from_collection(collection);
    tracing::debug!(operation, count = response.total_count, "Assembled dataset response");

    #[cfg(feature = "metrics")]
    crate::metrics::record_datasets_returned(operation, response.total_count);

    Json(response)
}

/// List all datasets
pub async fn list_datasets(State(state): State<AppState>) -> ApiResult<Json<ListDatasetsResponse>> {
    let collection = load_collection(&state, "list").await?;
    Ok(respond("list", &collection))
}

/// Search datasets by keyword in name or email
pub async fn search_datasets(
    State(state): State<AppState>,
    Json(request): Json<SearchDatasetsRequest>,
) -> ApiResult<Json<ListDatasetsResponse>> {
    let collection = load_collection(&state, "search").await?;
    tracing::debug!(keyword = %request.keyword, "Searching datasets");
    Ok(respond("search", &collection.search(&request.keyword)))
}

/// Filter datasets by a substring of the owner email
pub async fn filter_datasets_by_email(
    State(state): State<AppState>,
    Json(request): Json<FilterByEmailRequest>,
) -> ApiResult<Json<ListDatasetsResponse>> {
    let collection = load_collection(&state, "filter_by_email").await?;
    tracing::debug!(email_pattern = %request.email_pattern, "Filtering datasets by email");
    Ok(respond(
        "filter_by_email",
        &collection.filter_by_email(&request.email_pattern),
    ))
}

/// Unique owner emails across all datasets
pub async fn list_unique_emails(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let collection = load_collection(&state, "unique_emails").await?;
    Ok(Json(collection.list_unique_emails()))
}

/// Unique dataset names across all datasets
pub async fn list_unique_names(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let collection = load_collection(&state, "unique_names").await?;
    Ok(Json(collection.list_unique_names()))
}
