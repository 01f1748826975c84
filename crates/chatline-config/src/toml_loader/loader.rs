//! Core TOML config loading: read from path or platform default.

use crate::schema::ChatlineConfig;
use crate::validation;
use chatline_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. Validation problems are logged as a
/// warning and the parsed values are returned unchanged.
pub fn load_from_path(path: &Path) -> Result<ChatlineConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: ChatlineConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("{e}; values are used as given");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/chatline/config.toml`
/// On macOS: `~/Library/Application Support/chatline/config.toml`
///
/// If the file does not exist, a commented default is written and
/// defaults are returned.
pub fn load_default() -> Result<ChatlineConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(ChatlineConfig::default());
    }

    load_from_path(&path)
}
