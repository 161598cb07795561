//! Error responses
//!
//! Every failure reaching the HTTP boundary becomes a 500 with a textual
//! detail; callers see a single failure category.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use syft_datasets_core::DatasetError;

/// Error body returned on failure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Errors surfaced by API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The dataset supplier failed or could not be initialized
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal Server Error".to_string(),
                detail: Some(self.to_string()),
            }),
        )
            .into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_maps_to_500_with_detail() {
        let err = ApiError::from(DatasetError::SourceUnavailable("offline".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(
            body.detail.as_deref(),
            Some("Dataset source unavailable: offline")
        );
    }
}
