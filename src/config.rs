//! Application configuration
//! Optional JSON file read once at startup. Nothing is written back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "ADMISSION_VIEWER_CONFIG";
/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "admission_viewer.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Page background, skipped when the file does not exist
    pub background_image: Option<PathBuf>,
    pub table_row_height: f32,
    /// Pixel size of exported chart images
    pub export_size: [u32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "AdmissionDbSimulator".to_string(),
            window_size: [1200.0, 750.0],
            min_window_size: [900.0, 600.0],
            background_image: Some(PathBuf::from("background.png")),
            table_row_height: 22.0,
            export_size: [1200, 900],
        }
    }
}

impl AppConfig {
    /// Path from the environment, else the working-directory default.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from [`AppConfig::default_path`], falling back to defaults on error.
    pub fn load() -> Self {
        let path = Self::default_path();
        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Configuration: {:?}", config);
                config
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }
}
