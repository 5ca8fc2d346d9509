// Configuration loader
// Reads ~/.ai-buddy/config.toml (or an explicit path), then environment overrides

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;
use crate::errors::BuddyError;

/// ~/.ai-buddy/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ai-buddy").join("config.toml"))
}

/// Load configuration from `path` or the default location, then the environment
///
/// A missing file means defaults; an unreadable or malformed file is an error.
/// The API key is not checked here, see [`Config::require_api_key`].
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => default_config_path(),
    };

    let mut config = match path {
        Some(p) if p.exists() => load_config_from(&p)?,
        Some(p) => {
            tracing::debug!("No config file at {}, using defaults", p.display());
            Config::default()
        }
        None => Config::default(),
    };

    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

/// Parse one TOML config file (no environment overrides)
pub fn load_config_from(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .map_err(|e| BuddyError::ConfigParse(e.to_string()))
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    Ok(config)
}
