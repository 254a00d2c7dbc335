//! Load the config document from disk, once, at startup.

use crate::config::{validate, ApiConfig};
use crate::error::ConfigLoadError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

impl ApiConfig {
    /// Read and validate the JSON document at `path`. Nothing is returned unless the
    /// whole document parses and validates.
    pub fn load(path: impl AsRef<Path>) -> Result<ApiConfig, ConfigLoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ConfigLoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let config = Self::from_json_str(&raw).map_err(|e| match e {
            ConfigLoadError::Parse { source, .. } => ConfigLoadError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> Result<ApiConfig, ConfigLoadError> {
        let config: ApiConfig = serde_json::from_str(raw).map_err(|source| ConfigLoadError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        validate(&config)?;
        Ok(config)
    }
}

/// Config path from `CONFIG_PATH` (a `.env` file is honoured), else `config.json`.
pub fn config_path_from_env() -> PathBuf {
    dotenvy::dotenv().ok();
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}
