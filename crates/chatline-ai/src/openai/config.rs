//! OpenAI client configuration.

use std::fmt;
use std::time::Duration;

use crate::AiError;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub(crate) const API_KEYS_URL: &str = "https://platform.openai.com/account/api-keys";

/// OpenAI client configuration.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Collapse newlines and double spaces before sending.
    pub clean_prompt: bool,
    /// Ask completions to echo the prompt back in front of the answer.
    pub echo: bool,
    /// Send every completion to the code model regardless of `Parameters::model`.
    pub code_mode: bool,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("clean_prompt", &self.clean_prompt)
            .field("echo", &self.echo)
            .field("code_mode", &self.code_mode)
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            clean_prompt: false,
            echo: false,
            code_mode: false,
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(120),
        }
    }

    /// Read the API key from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, AiError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(AiError::NotConfigured(format!(
                "{var} environment var is missing\nVisit {API_KEYS_URL} to get one"
            ))),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_clean_prompt(mut self, clean: bool) -> Self {
        self.clean_prompt = clean;
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn with_code_mode(mut self, code_mode: bool) -> Self {
        self.code_mode = code_mode;
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }
}
