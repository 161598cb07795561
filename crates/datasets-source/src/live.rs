//! Live SyftBox source
//!
//! Discovers datasets on the local SyftBox filesystem. A dataset is any
//! directory at
//!
//! ```text
//! {data_dir}/datasites/{email}/private/datasets/{name}
//! ```
//!
//! which is the on-disk counterpart of `syft://{email}/private/datasets/{name}`.
//! The client config is re-read on every load, so a client that logs in after
//! the server started is picked up without a restart.

use std::fs;
use std::io;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use syft_datasets_core::{DatasetCollection, DatasetError, DatasetRecord, Result};

use crate::client_config::SyftBoxConfig;
use crate::{join_error, DatasetSource, SourceIdentity, SourceKind};

/// Filesystem-backed source
#[derive(Debug, Clone)]
pub struct SyftBoxSource {
    /// Path to the SyftBox client config
    config_path: PathBuf,
}

impl SyftBoxSource {
    pub fn new<P: AsRef<Path>>(config_path: P) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

impl DatasetSource for SyftBoxSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Live
    }

    fn load(&self) -> Pin<Box<dyn Future<Output = Result<DatasetCollection>> + Send + '_>> {
        let config_path = self.config_path.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || {
                let config = SyftBoxConfig::load(&config_path)?;
                let records = discover(&config.datasites_dir())?;
                tracing::debug!(
                    count = records.len(),
                    email = %config.email,
                    "Discovered datasets"
                );
                Ok(DatasetCollection::new(records))
            })
            .await
            .map_err(join_error)?
        })
    }

    fn identity(&self) -> Pin<Box<dyn Future<Output = Result<Option<SourceIdentity>>> + Send + '_>> {
        let config_path = self.config_path.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || {
                let config = SyftBoxConfig::load(&config_path)?;
                Ok(Some(SourceIdentity {
                    email: config.email,
                    client_url: config.client_url,
                }))
            })
            .await
            .map_err(join_error)?
        })
    }
}

/// Walk the datasites directory, ordered by owner email then dataset name.
///
/// A datasite without `private/datasets` has published nothing. A datasite
/// that cannot be read is logged and skipped so the rest are still listed.
fn discover(datasites: &Path) -> Result<Vec<DatasetRecord>> {
    if !datasites.is_dir() {
        return Err(DatasetError::SourceUnavailable(format!(
            "Datasites directory not found: {}",
            datasites.display()
        )));
    }

    let mut records = Vec::new();
    for email in subdirectories(datasites)? {
        let datasets_dir = datasites.join(&email).join("private").join("datasets");
        match subdirectories(&datasets_dir) {
            Ok(names) => records.extend(
                names
                    .into_iter()
                    .map(|name| DatasetRecord::new(name, email.clone())),
            ),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                datasite = %email,
                path = %datasets_dir.display(),
                error = %e,
                "Skipping unreadable datasite"
            ),
        }
    }
    Ok(records)
}

/// Sorted names of visible child directories, following symlinks.
fn subdirectories(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        // Entries removed mid-scan report as not a directory
        if !entry.path().is_dir() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 directory");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    /// SyftBox tree with a client config pointing at it
    fn syftbox_fixture(datasets: &[(&str, &str)]) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("SyftBox");
        fs::create_dir_all(data_dir.join("datasites")).unwrap();

        for (email, name) in datasets {
            fs::create_dir_all(
                data_dir
                    .join("datasites")
                    .join(email)
                    .join("private")
                    .join("datasets")
                    .join(name),
            )
            .unwrap();
        }

        let config_path = dir.path().join("config.json");
        let config = SyftBoxConfig {
            email: "me@openmined.org".to_string(),
            data_dir,
            client_url: "http://127.0.0.1:8082".to_string(),
            server_url: None,
        };
        fs::write(&config_path, serde_json::to_string(&config).unwrap()).unwrap();

        (dir, config_path)
    }

    #[tokio::test]
    async fn test_discovers_datasets_in_order() {
        let (_dir, config_path) = syftbox_fixture(&[
            ("user@test.com", "test_data"),
            ("demo@example.com", "zeta"),
            ("demo@example.com", "alpha"),
        ]);

        let collection = SyftBoxSource::new(&config_path).load().await.unwrap();
        let found: Vec<(&str, &str)> = collection
            .iter()
            .map(|ds| (ds.owner_email.as_str(), ds.name.as_str()))
            .collect();

        assert_eq!(
            found,
            vec![
                ("demo@example.com", "alpha"),
                ("demo@example.com", "zeta"),
                ("user@test.com", "test_data"),
            ]
        );
    }

    #[tokio::test]
    async fn test_skips_files_hidden_entries_and_bare_datasites() {
        let (dir, config_path) = syftbox_fixture(&[("a@b.com", "real")]);
        let datasites = dir.path().join("SyftBox").join("datasites");
        let datasets_dir = datasites.join("a@b.com").join("private").join("datasets");

        fs::write(datasets_dir.join("notes.txt"), "not a dataset").unwrap();
        fs::create_dir_all(datasets_dir.join(".staging")).unwrap();
        fs::create_dir_all(datasites.join("nobody@b.com").join("public")).unwrap();

        let collection = SyftBoxSource::new(&config_path).load().await.unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.records()[0].name, "real");
    }

    #[tokio::test]
    async fn test_missing_datasites_is_unavailable() {
        let (dir, config_path) = syftbox_fixture(&[]);
        fs::remove_dir_all(dir.path().join("SyftBox").join("datasites")).unwrap();

        let err = SyftBoxSource::new(&config_path).load().await.unwrap_err();
        assert!(matches!(err, DatasetError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_empty_datasites_is_empty_collection() {
        let (_dir, config_path) = syftbox_fixture(&[]);
        let collection = SyftBoxSource::new(&config_path).load().await.unwrap();
        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn test_identity_from_config() {
        let (_dir, config_path) = syftbox_fixture(&[]);
        let source = SyftBoxSource::new(&config_path);
        assert_eq!(source.config_path(), config_path);

        let identity = source.identity().await.unwrap().unwrap();
        assert_eq!(identity.email, "me@openmined.org");
        assert_eq!(identity.client_url, "http://127.0.0.1:8082");
    }

    #[tokio::test]
    async fn test_unreadable_datasite_is_skipped() {
        let (dir, config_path) = syftbox_fixture(&[("good@b.com", "kept")]);
        let broken = dir
            .path()
            .join("SyftBox")
            .join("datasites")
            .join("broken@b.com")
            .join("private");
        fs::create_dir_all(&broken).unwrap();
        // `datasets` is a file, so listing it fails
        fs::write(broken.join("datasets"), "not a directory").unwrap();

        let collection = SyftBoxSource::new(&config_path).load().await.unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.records()[0].owner_email, "good@b.com");
        assert_eq!(collection.records()[0].name, "kept");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_follows_symlinked_datasets_and_datasites() {
        use std::os::unix::fs::symlink;

        let (dir, config_path) = syftbox_fixture(&[("a@b.com", "real")]);
        let datasites = dir.path().join("SyftBox").join("datasites");
        let datasets_dir = datasites.join("a@b.com").join("private").join("datasets");

        let outside = dir.path().join("outside");
        fs::create_dir_all(outside.join("shared")).unwrap();
        symlink(outside.join("shared"), datasets_dir.join("linked")).unwrap();

        let mirrored = dir.path().join("mirror");
        fs::create_dir_all(mirrored.join("private").join("datasets").join("remote")).unwrap();
        symlink(&mirrored, datasites.join("m@c.com")).unwrap();

        let collection = SyftBoxSource::new(&config_path).load().await.unwrap();
        let found: Vec<(&str, &str)> = collection
            .iter()
            .map(|ds| (ds.owner_email.as_str(), ds.name.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("a@b.com", "linked"),
                ("a@b.com", "real"),
                ("m@c.com", "remote"),
            ]
        );
    }
}
