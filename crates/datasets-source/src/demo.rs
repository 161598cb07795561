//! Demo source
//!
//! Serves a fixed two-record collection. This is an explicitly degraded
//! mode: the data is not discovered from anywhere.

use std::future::Future;
use std::pin::Pin;

use syft_datasets_core::{DatasetCollection, DatasetRecord, Result};

use crate::{DatasetSource, SourceIdentity, SourceKind};

/// The fixture served by [`DemoSource`].
pub fn demo_records() -> Vec<DatasetRecord> {
    vec![
        DatasetRecord::new("sample_dataset", "demo@example.com"),
        DatasetRecord::new("test_data", "user@test.com"),
    ]
}

/// Fixture-backed source
#[derive(Debug, Clone, Default)]
pub struct DemoSource;

impl DemoSource {
    pub fn new() -> Self {
        Self
    }
}

impl DatasetSource for DemoSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Demo
    }

    fn load(&self) -> Pin<Box<dyn Future<Output = Result<DatasetCollection>> + Send + '_>> {
        Box::pin(async { Ok(DatasetCollection::new(demo_records())) })
    }

    fn identity(&self) -> Pin<Box<dyn Future<Output = Result<Option<SourceIdentity>>> + Send + '_>> {
        Box::pin(async { Ok(None) })
    }
}
