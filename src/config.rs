//! API key and base URL resolution.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::api::DEFAULT_BASE_URL;

/// Environment variable consulted when no `--key` flag is given.
pub const API_KEY_ENV: &str = "RAWG_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key: pass --key, set {API_KEY_ENV}, or add \"api_key\" to {0}")]
    MissingKey(String),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Optional settings read from the JSON config file.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
}

impl AppConfig {
    /// Resolve the configuration from CLI flags, the environment, and the
    /// config file, in that order of precedence.
    pub fn resolve(
        cli_key: Option<String>,
        cli_base_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = Self::load_file()?;
        let config_label = config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "the config file".to_string());

        let api_key = cli_key
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
            .or(file.api_key)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingKey(config_label))?;

        let base_url = cli_base_url
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }

    fn load_file() -> Result<FileConfig, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(FileConfig::default());
        };
        if !path.exists() {
            return Ok(FileConfig::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Platform directories for this application.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "game-explorer", "game-explorer")
}

/// Location of the optional JSON config file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}
