//! OpenAI client struct, request building, and response parsing.

use crate::params::Parameters;
use crate::{AiError, GenerationInput};

use super::config::OpenAiConfig;

/// Model used for completions when code mode is on.
pub const CODE_MODEL: &str = "code-davinci-002";

/// Which endpoint a request goes to; also decides how choices are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    Completions,
    Edits,
    ChatCompletions,
}

impl Endpoint {
    pub(crate) fn path(self) -> &'static str {
        match self {
            Endpoint::Completions => "completions",
            Endpoint::Edits => "edits",
            Endpoint::ChatCompletions => "chat/completions",
        }
    }
}

/// OpenAI API client.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub(crate) fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        )
    }

    /// Build the endpoint and JSON body for one request.
    pub(crate) fn build_request(
        &self,
        input: GenerationInput<'_>,
        params: &Parameters,
    ) -> (Endpoint, serde_json::Value) {
        match input {
            GenerationInput::Completion { prompt } => {
                let mut prompt = if self.config.clean_prompt {
                    clean_whitespace(prompt)
                } else {
                    prompt.to_string()
                };
                // completion prompts always end in a newline
                if !prompt.ends_with('\n') {
                    prompt.push('\n');
                }
                let model = if self.config.code_mode {
                    CODE_MODEL
                } else {
                    params.model.as_str()
                };
                let body = serde_json::json!({
                    "model": model,
                    "prompt": prompt,
                    "max_tokens": params.max_tokens,
                    "echo": self.config.echo,
                    "n": params.count,
                    "temperature": params.temperature,
                    "top_p": params.top_p,
                    "presence_penalty": params.presence_penalty,
                    "frequency_penalty": params.frequency_penalty,
                });
                (Endpoint::Completions, body)
            }
            GenerationInput::Edit { input, instruction } => {
                let input = if self.config.clean_prompt {
                    clean_whitespace(input)
                } else {
                    input.to_string()
                };
                let body = serde_json::json!({
                    "model": params.model,
                    "input": input,
                    "instruction": instruction,
                    "n": params.count,
                    "temperature": params.temperature,
                    "top_p": params.top_p,
                });
                (Endpoint::Edits, body)
            }
            GenerationInput::Chat { messages } => {
                let body = serde_json::json!({
                    "model": params.model,
                    "messages": messages,
                    "max_tokens": params.max_tokens,
                    "n": params.count,
                    "temperature": params.temperature,
                    "top_p": params.top_p,
                    "presence_penalty": params.presence_penalty,
                    "frequency_penalty": params.frequency_penalty,
                });
                (Endpoint::ChatCompletions, body)
            }
        }
    }

    /// Extract the candidate texts from a response body.
    pub(crate) fn parse_choices(
        endpoint: Endpoint,
        json: &serde_json::Value,
    ) -> Result<Vec<String>, AiError> {
        let choices = json["choices"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("response has no choices array".into()))?;

        let texts = choices
            .iter()
            .map(|choice| {
                let text = match endpoint {
                    Endpoint::ChatCompletions => choice["message"]["content"].as_str(),
                    Endpoint::Completions | Endpoint::Edits => choice["text"].as_str(),
                };
                text.unwrap_or_default().to_string()
            })
            .collect();
        Ok(texts)
    }
}

/// Replace newlines with spaces, then collapse double spaces.
pub fn clean_whitespace(text: &str) -> String {
    text.replace('\n', " ").replace("  ", " ")
}
