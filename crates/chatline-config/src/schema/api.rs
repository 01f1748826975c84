//! Completion API endpoint configuration.

use serde::{Deserialize, Serialize};

/// Where requests are sent and how the credential is found.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; `/completions`, `/edits` and `/chat/completions` are appended.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub key_env: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            key_env: "CHATGPT_API_KEY".into(),
            connect_timeout_secs: 10,
            timeout_secs: 120,
        }
    }
}
