//! API views of datasets
//!
//! Maps query results into the shapes returned to clients. Everything here
//! is a pure transformation of a [`DatasetCollection`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use syft_datasets_core::{tags, DatasetCollection, DatasetRecord};

/// Placeholder size. Not measured from any data.
pub const PLACEHOLDER_SIZE: &str = "Unknown";

/// Placeholder type. Not derived from any data.
pub const PLACEHOLDER_TYPE: &str = "dataset";

/// One dataset as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetView {
    /// Random per response; the same dataset gets a new id on every call
    pub id: String,
    pub name: String,
    pub email: String,
    pub syft_url: String,
    pub description: String,
    /// Time the response was built; no creation time is known
    pub created_at: DateTime<Utc>,
    /// Time the response was built; no update time is known
    pub updated_at: DateTime<Utc>,
    pub size: String,
    #[serde(rename = "type")]
    pub dataset_type: String,
    pub tags: Vec<String>,
}

impl DatasetView {
    pub fn from_record(record: &DatasetRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: record.name.clone(),
            email: record.owner_email.clone(),
            syft_url: record.location(),
            description: format!("Dataset from {}", record.owner_email),
            created_at: now,
            updated_at: now,
            size: PLACEHOLDER_SIZE.to_string(),
            dataset_type: PLACEHOLDER_TYPE.to_string(),
            tags: tags::domain_tags(&record.owner_email),
        }
    }
}

/// Datasets plus summary indexes for the result set they came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDatasetsResponse {
    pub datasets: Vec<DatasetView>,
    pub total_count: usize,
    pub unique_emails: Vec<String>,
    pub unique_names: Vec<String>,
}

impl ListDatasetsResponse {
    pub fn from_collection(collection: &DatasetCollection) -> Self {
        let now = Utc::now();
        let datasets: Vec<DatasetView> = collection
            .iter()
            .map(|record| DatasetView::from_record(record, now))
            .collect();

        Self {
            total_count: datasets.len(),
            datasets,
            unique_emails: collection.list_unique_emails(),
            unique_names: collection.list_unique_names(),
        }
    }
}

/// Body of `POST /api/v1/datasets/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDatasetsRequest {
    pub keyword: String,
}

/// Body of `POST /api/v1/datasets/filter-by-email`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterByEmailRequest {
    pub email_pattern: String,
}
