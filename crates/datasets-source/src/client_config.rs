//! SyftBox client configuration
//!
//! The SyftBox client writes a JSON config (by default
//! `~/.syftbox/config.json`) describing the logged-in identity and where the
//! synced datasites live on disk.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use syft_datasets_core::{DatasetError, Result};

/// Environment variable overriding the config location
pub const CONFIG_PATH_ENV: &str = "SYFTBOX_CLIENT_CONFIG_PATH";

/// Directory under `data_dir` holding one folder per datasite
pub const DATASITES_DIR: &str = "datasites";

/// Parsed SyftBox client config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyftBoxConfig {
    /// Email of the logged-in datasite
    pub email: String,
    /// Root of the synced SyftBox directory
    pub data_dir: PathBuf,
    /// URL of the local client app
    #[serde(default = "default_client_url")]
    pub client_url: String,
    /// URL of the SyftBox cache server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
}

fn default_client_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

impl SyftBoxConfig {
    /// Read and parse the config at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            DatasetError::ClientConfig(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&raw)
            .map_err(|e| DatasetError::ClientConfig(format!("{}: {}", path.display(), e)))
    }

    fn parse(raw: &str) -> std::result::Result<Self, String> {
        let config: SyftBoxConfig = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        if config.email.trim().is_empty() {
            return Err("email cannot be empty".to_string());
        }
        Ok(config)
    }

    /// Directory containing every synced datasite.
    pub fn datasites_dir(&self) -> PathBuf {
        self.data_dir.join(DATASITES_DIR)
    }
}

/// Config location: `$SYFTBOX_CLIENT_CONFIG_PATH`, else `~/.syftbox/config.json`.
pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    dirs::home_dir()
        .map(|home| home.join(".syftbox").join("config.json"))
        .ok_or_else(|| DatasetError::ClientConfig("Cannot determine home directory".into()))
}
