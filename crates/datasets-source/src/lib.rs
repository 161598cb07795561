//! Syft Datasets Source
//!
//! Suppliers of dataset collections for the query engine.
//! Two variants exist and one is chosen explicitly at startup:
//! - [`SyftBoxSource`]: live discovery on the local SyftBox filesystem
//! - [`DemoSource`]: a fixed two-record fixture for running without SyftBox

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::str::FromStr;

use syft_datasets_core::{DatasetCollection, DatasetError, Result};

pub mod client_config;
pub mod demo;
pub mod live;

pub use client_config::{default_config_path, SyftBoxConfig, CONFIG_PATH_ENV};
pub use demo::{demo_records, DemoSource};
pub use live::SyftBoxSource;

/// Convenience alias for trait objects.
pub type DynDatasetSource = dyn DatasetSource;

/// Identity of the client a source is operating as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIdentity {
    /// Email of the logged-in datasite
    pub email: String,
    /// URL of the running SyftBox client app
    pub client_url: String,
}

/// Supplier of dataset collections (async)
///
/// Every call to [`DatasetSource::load`] hands over a fresh point-in-time
/// snapshot; callers never observe later changes to the underlying store.
pub trait DatasetSource: Send + Sync {
    /// Which variant this source is.
    fn kind(&self) -> SourceKind;

    /// Load the current collection, or fail if the supplier is unreachable.
    fn load(&self) -> Pin<Box<dyn Future<Output = Result<DatasetCollection>> + Send + '_>>;

    /// Identity of the client, if the source is backed by one.
    fn identity(&self) -> Pin<Box<dyn Future<Output = Result<Option<SourceIdentity>>> + Send + '_>>;
}

/// Selectable source variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Backed by the SyftBox filesystem
    Live,
    /// Fixed fixture data, explicitly degraded
    Demo,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Live => write!(f, "live"),
            SourceKind::Demo => write!(f, "demo"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = DatasetError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(SourceKind::Live),
            "demo" => Ok(SourceKind::Demo),
            _ => Err(DatasetError::Internal(format!(
                "Unknown dataset source: {} (expected 'live' or 'demo')",
                s
            ))),
        }
    }
}

/// Build a source for the given variant.
///
/// `config_path` points at the SyftBox client config used by the live
/// source; `None` falls back to [`default_config_path`]. It is ignored for
/// the demo source.
pub fn source_from_kind(
    kind: SourceKind,
    config_path: Option<PathBuf>,
) -> Result<Box<dyn DatasetSource>> {
    match kind {
        SourceKind::Live => {
            let path = match config_path {
                Some(path) => path,
                None => default_config_path()?,
            };
            let source = SyftBoxSource::new(path);
            tracing::info!(
                config = %source.config_path().display(),
                "Using SyftBox client config"
            );
            Ok(Box::new(source))
        }
        SourceKind::Demo => Ok(Box::new(DemoSource::new())),
    }
}

pub(crate) fn join_error(e: tokio::task::JoinError) -> DatasetError {
    DatasetError::Internal(format!("Task join error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_round_trip() {
        assert_eq!("live".parse::<SourceKind>().unwrap(), SourceKind::Live);
        assert_eq!("DEMO".parse::<SourceKind>().unwrap(), SourceKind::Demo);
        assert_eq!(SourceKind::Live.to_string(), "live");
        assert!("mock".parse::<SourceKind>().is_err());
    }

    #[tokio::test]
    async fn test_source_from_kind_demo() {
        let source = source_from_kind(SourceKind::Demo, None).unwrap();
        assert_eq!(source.kind(), SourceKind::Demo);
        assert_eq!(source.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_source_from_kind_live_with_missing_config() {
        let source =
            source_from_kind(SourceKind::Live, Some(PathBuf::from("/nonexistent/config.json")))
                .unwrap();
        assert_eq!(source.kind(), SourceKind::Live);

        let err = source.load().await.unwrap_err();
        assert!(err.is_unavailable());
    }
}
