//! Config loading
//!
//! [`AppConfig`] comes either from an explicit TOML file or from the per-user
//! config store. Scene files go through the same TOML helpers.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use vgw_types::AppConfig;

use crate::error::ConfigError;

/// Name of the per-user config store
pub const APP_NAME: &str = "vgroup-weights";

/// Read and parse a TOML file
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize to pretty TOML and write to `path`
pub fn save_toml<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(value).map_err(|e| ConfigError::SerializeError {
        path: path.to_path_buf(),
        source: e,
    })?;

    fs::write(path, contents).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn load_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = load_toml(path)?;
    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

pub fn save_file(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    save_toml(path, config)
}

/// Load the user's config, falling back to defaults if the store is unreadable
pub fn load_user_config() -> AppConfig {
    match confy::load(APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load user config, using defaults");
            AppConfig::default()
        }
    }
}

/// Explicit file if given, otherwise the user config
pub fn resolve(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_file(path),
        None => Ok(load_user_config()),
    }
}
