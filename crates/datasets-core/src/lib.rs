//! Syft Datasets Core
//!
//! Core types and the read-only query engine for datasets published in the
//! SyftBox ecosystem.
//!
//! Every query is a pure function over an owned snapshot of records, so any
//! number of queries may run concurrently against the same collection.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod tags;

/// URL scheme used for dataset locations
pub const SYFT_URL_SCHEME: &str = "syft://";

/// Build the location of a dataset from its owner and name.
///
/// Always `syft://{email}/private/datasets/{name}`.
pub fn format_syft_url(email: &str, dataset_name: &str) -> String {
    format!("{SYFT_URL_SCHEME}{email}/private/datasets/{dataset_name}")
}

/// Domain part of an email address.
///
/// Returns the text after the first `@`, or the whole input when there is no `@`.
pub fn domain_from_email(email: &str) -> &str {
    match email.split_once('@') {
        Some((_, domain)) => domain,
        None => email,
    }
}

/// A single dataset discovered in the ecosystem
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Human-readable dataset name (not guaranteed unique)
    pub name: String,
    /// Email identity of the datasite that published the dataset
    pub owner_email: String,
}

impl DatasetRecord {
    pub fn new(name: impl Into<String>, owner_email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_email: owner_email.into(),
        }
    }

    /// Location of the dataset, derived from owner and name.
    pub fn location(&self) -> String {
        format_syft_url(&self.owner_email, &self.name)
    }

    fn matches_keyword(&self, keyword: &str) -> bool {
        self.name.contains(keyword) || self.owner_email.contains(keyword)
    }
}

/// Ordered, read-only set of dataset records
///
/// Search and filter return new collections so that the unique-value indexes
/// are always computed relative to the result set they are called on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetCollection {
    datasets: Vec<DatasetRecord>,
}

impl DatasetCollection {
    /// Wrap records in supplier order. The order is never changed afterwards.
    pub fn new(datasets: Vec<DatasetRecord>) -> Self {
        Self { datasets }
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DatasetRecord> {
        self.datasets.iter()
    }

    /// All records in collection order.
    pub fn records(&self) -> &[DatasetRecord] {
        &self.datasets
    }

    /// Records whose name or owner email contains `keyword`.
    ///
    /// Matching is case-sensitive substring matching; an empty keyword matches
    /// every record.
    pub fn search(&self, keyword: &str) -> DatasetCollection {
        self.select(|ds| ds.matches_keyword(keyword))
    }

    /// Records whose owner email contains `pattern` as a plain substring.
    pub fn filter_by_email(&self, pattern: &str) -> DatasetCollection {
        self.select(|ds| ds.owner_email.contains(pattern))
    }

    /// Distinct owner emails in this collection, in order of first appearance.
    pub fn list_unique_emails(&self) -> Vec<String> {
        unique(self.datasets.iter().map(|ds| ds.owner_email.as_str()))
    }

    /// Distinct dataset names in this collection, in order of first appearance.
    pub fn list_unique_names(&self) -> Vec<String> {
        unique(self.datasets.iter().map(|ds| ds.name.as_str()))
    }

    fn select(&self, predicate: impl Fn(&DatasetRecord) -> bool) -> DatasetCollection {
        self.datasets
            .iter()
            .filter(|ds| predicate(*ds))
            .cloned()
            .collect()
    }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

impl FromIterator<DatasetRecord> for DatasetCollection {
    fn from_iter<I: IntoIterator<Item = DatasetRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for DatasetCollection {
    type Item = DatasetRecord;
    type IntoIter = std::vec::IntoIter<DatasetRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.datasets.into_iter()
    }
}

impl<'a> IntoIterator for &'a DatasetCollection {
    type Item = &'a DatasetRecord;
    type IntoIter = std::slice::Iter<'a, DatasetRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.datasets.iter()
    }
}

/// Errors that can occur while obtaining a dataset collection
///
/// The query engine itself cannot fail; every variant originates in the
/// supplier of the collection.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Dataset source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("SyftBox client config error: {0}")]
    ClientConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DatasetError {
    /// True when the supplier could not be reached or initialized.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DatasetError::SourceUnavailable(_) | DatasetError::ClientConfig(_)
        )
    }
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DatasetCollection {
        DatasetCollection::new(vec![
            DatasetRecord::new("sample_dataset", "demo@example.com"),
            DatasetRecord::new("test_data", "user@test.com"),
        ])
    }

    fn sorted(mut values: Vec<String>) -> Vec<String> {
        values.sort();
        values
    }

    fn names(collection: &DatasetCollection) -> Vec<&str> {
        collection.iter().map(|ds| ds.name.as_str()).collect()
    }

    #[test]
    fn test_location_template() {
        let ds = DatasetRecord::new("crops", "farmer@example.com");
        assert_eq!(
            ds.location(),
            "syft://farmer@example.com/private/datasets/crops"
        );
        assert_eq!(ds.location(), format_syft_url(&ds.owner_email, &ds.name));
    }

    #[test]
    fn test_domain_from_email() {
        assert_eq!(domain_from_email("a@b.com"), "b.com");
        assert_eq!(domain_from_email("noatsymbol"), "noatsymbol");
        assert_eq!(domain_from_email("trailing@"), "");
        assert_eq!(domain_from_email("a@b@c"), "b@c");
    }

    #[test]
    fn test_list_all_preserves_order() {
        let collection = DatasetCollection::new(vec![
            DatasetRecord::new("zeta", "z@example.com"),
            DatasetRecord::new("alpha", "a@example.com"),
            DatasetRecord::new("mid", "m@example.com"),
        ]);
        assert_eq!(names(&collection), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_search_matches_name_or_email() {
        // "test" hits both the name and the email of the same record
        let results = sample().search("test");
        assert_eq!(names(&results), vec!["test_data"]);

        let results = sample().search("sample");
        assert_eq!(names(&results), vec!["sample_dataset"]);

        let results = sample().search("example");
        assert_eq!(names(&results), vec!["sample_dataset"]);

        let results = sample().search("_da");
        assert_eq!(names(&results), vec!["sample_dataset", "test_data"]);
    }

    #[test]
    fn test_search_empty_keyword_matches_everything() {
        let collection = sample();
        assert_eq!(collection.search(""), collection);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let results = sample().search("zzz");
        assert!(results.is_empty());
        assert!(results.list_unique_emails().is_empty());
        assert!(results.list_unique_names().is_empty());
    }

    #[test]
    fn test_search_is_case_sensitive() {
        assert!(sample().search("TEST").is_empty());
        assert!(sample().search("Sample").is_empty());
    }

    #[test]
    fn test_filter_by_email() {
        let results = sample().filter_by_email("example.com");
        assert_eq!(results.len(), 1);
        assert_eq!(results.records()[0].owner_email, "demo@example.com");

        // Names are not considered
        assert!(sample().filter_by_email("sample").is_empty());
        // Plain substring, not a glob
        assert!(sample().filter_by_email("*@test.com").is_empty());
        assert_eq!(sample().filter_by_email("").len(), 2);
    }

    #[test]
    fn test_unique_values_are_deduplicated() {
        let collection = DatasetCollection::new(vec![
            DatasetRecord::new("a", "one@x.com"),
            DatasetRecord::new("b", "one@x.com"),
            DatasetRecord::new("a", "two@y.com"),
        ]);
        assert_eq!(
            sorted(collection.list_unique_emails()),
            vec!["one@x.com", "two@y.com"]
        );
        assert_eq!(sorted(collection.list_unique_names()), vec!["a", "b"]);
    }

    #[test]
    fn test_unique_values_follow_result_set() {
        let collection = sample();
        let filtered = collection.filter_by_email("example.com");
        assert_eq!(filtered.list_unique_emails(), vec!["demo@example.com"]);
        assert_eq!(filtered.list_unique_names(), vec!["sample_dataset"]);

        assert_eq!(
            sorted(collection.list_unique_emails()),
            vec!["demo@example.com", "user@test.com"]
        );
        assert_eq!(
            sorted(collection.list_unique_names()),
            vec!["sample_dataset", "test_data"]
        );
    }

    #[test]
    fn test_queries_are_idempotent() {
        let collection = sample();
        assert_eq!(collection.search("a"), collection.search("a"));
        assert_eq!(
            collection.filter_by_email("test"),
            collection.filter_by_email("test")
        );
    }

    #[test]
    fn test_record_serializes_flat() {
        let ds = DatasetRecord::new("crops", "farmer@example.com");
        let json = serde_json::to_value(&ds).unwrap();
        assert_eq!(json["name"], "crops");
        assert_eq!(json["owner_email"], "farmer@example.com");
    }

    #[test]
    fn test_error_categories() {
        assert!(DatasetError::SourceUnavailable("down".into()).is_unavailable());
        assert!(DatasetError::ClientConfig("missing".into()).is_unavailable());
        assert!(!DatasetError::Internal("boom".into()).is_unavailable());
    }
}
