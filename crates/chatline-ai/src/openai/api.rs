//! Generator trait implementation for OpenAiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::params::Parameters;
use crate::{AiError, GenerationInput, Generator};

use super::client::OpenAiClient;

#[async_trait]
impl Generator for OpenAiClient {
    async fn generate(
        &self,
        input: GenerationInput<'_>,
        params: &Parameters,
    ) -> Result<Vec<String>, AiError> {
        let (endpoint, body) = self.build_request(input, params);
        let url = self.url(endpoint);

        debug!(model = %body["model"], n = params.count, %url, "OpenAI API request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout
                } else {
                    AiError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        let choices = Self::parse_choices(endpoint, &json)?;
        debug!(candidates = choices.len(), "OpenAI API response");
        Ok(choices)
    }
}
