//! chatline configuration.
//!
//! TOML-based configuration for the console client. Every section uses
//! serde defaults, so a file that only sets `[defaults] model` is valid.
//! Command-line flags are layered on top of these values by the binary.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ApiConfig, ChatlineConfig, DefaultsConfig, LoggingConfig, PromptsConfig};

use std::path::Path;

use chatline_common::ConfigError;

/// Load config from an explicit path, or from the platform default path.
///
/// An explicit path must exist. The default path is created from the
/// commented template on first use.
pub fn load_config(path: Option<&Path>) -> Result<ChatlineConfig, ConfigError> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            toml_loader::load_from_path(path)
        }
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &ChatlineConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
