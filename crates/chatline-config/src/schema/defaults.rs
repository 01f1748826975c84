//! Default generation parameters.

use serde::{Deserialize, Serialize};

/// Starting values for the session's generation parameters.
///
/// Integers are signed on purpose: values are forwarded to the API
/// without clamping, so `max_tokens = -1` loads and is reported by
/// validation rather than rejected by the parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub model: String,
    pub max_tokens: i32,
    pub count: i32,
    pub temperature: f64,
    pub top_p: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            model: "text-davinci-003".into(),
            max_tokens: 1024,
            count: 1,
            temperature: 0.7,
            top_p: 1.0,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
        }
    }
}
