//! Server settings
//!
//! Every setting can be given as a flag or through the environment
//! (a `.env` file in the working directory is honored too).
//!
//! ## Configuration
//!
//! - `SYFT_DATASETS_HOST`: Bind address (default: 0.0.0.0)
//! - `SYFT_DATASETS_PORT`, falling back to `PORT`: Listen port (default: 8001)
//! - `SYFT_DATASETS_SOURCE`: `live` or `demo` (default: live)
//! - `SYFTBOX_CLIENT_CONFIG_PATH`: SyftBox client config (default: ~/.syftbox/config.json)
//! - `SYFT_DATASETS_DEBUG`: Debug mode, enables localhost CORS (default: true)
//! - `SYFT_DATASETS_STATIC_DIR`: Frontend build served at `/` (default: frontend/out)

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use syft_datasets_source::{SourceKind, CONFIG_PATH_ENV};

/// Default listen port
pub const DEFAULT_PORT: u16 = 8001;

/// Application version reported at startup
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug, Clone)]
#[command(name = "syft-datasets-api")]
#[command(version, about = "API for browsing datasets in the SyftBox ecosystem", long_about = None)]
pub struct Settings {
    /// Address to bind to
    #[arg(long, env = "SYFT_DATASETS_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "SYFT_DATASETS_PORT")]
    pub port: Option<u16>,

    /// Where datasets come from: `live` (SyftBox) or `demo` (fixture data)
    #[arg(long, env = "SYFT_DATASETS_SOURCE", default_value = "live")]
    pub source: SourceKind,

    /// Path to the SyftBox client config
    #[arg(long, env = CONFIG_PATH_ENV, value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Debug mode: verbose logging and permissive localhost CORS
    #[arg(long, env = "SYFT_DATASETS_DEBUG", default_value_t = true, action = clap::ArgAction::Set)]
    pub debug: bool,

    /// Directory with the built frontend, served at `/` when present
    #[arg(long, env = "SYFT_DATASETS_STATIC_DIR", default_value = "frontend/out")]
    pub static_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: None,
            source: SourceKind::Live,
            config_path: None,
            debug: true,
            static_dir: PathBuf::from("frontend/out"),
        }
    }
}

impl Settings {
    /// Listen port: flag or `SYFT_DATASETS_PORT`, then `PORT`, then the default.
    pub fn port(&self) -> u16 {
        self.port
            .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port())
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
