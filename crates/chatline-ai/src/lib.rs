//! Conversation core for chatline.
//!
//! Provides:
//! - `Session`: the running transcript (flat text or role-tagged messages)
//!   plus the generation parameters it is sent with
//! - `Generator`: the seam to a completion backend, with an
//!   OpenAI-compatible HTTP implementation
//! - `PromptStore`: named prompt templates, bundled or from a directory

pub mod openai;
pub mod params;
pub mod prompts;
pub mod session;

use std::fmt;

use async_trait::async_trait;

pub use openai::{OpenAiClient, OpenAiConfig};
pub use params::{ParamError, Parameter, Parameters};
pub use prompts::{BundledPrompts, DirPrompts, PromptStore};
pub use session::{Mode, Session};

/// A completion backend.
///
/// Returns one candidate per requested sample (`Parameters::count`).
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        input: GenerationInput<'_>,
        params: &Parameters,
    ) -> Result<Vec<String>, AiError>;
}

/// What a single request carries, per session mode.
#[derive(Debug, Clone, Copy)]
pub enum GenerationInput<'a> {
    /// Free-text completion of the whole transcript.
    Completion { prompt: &'a str },
    /// Rewrite `input` following `instruction`.
    Edit {
        input: &'a str,
        instruction: &'a str,
    },
    /// Role-based chat completion.
    Chat { messages: &'a [Message] },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Models served by the chat completions endpoint rather than plain completions.
pub fn is_chat_model(model: &str) -> bool {
    model.starts_with("gpt-3.5-turbo") || model.starts_with("gpt-4")
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("{0}")]
    NotConfigured(String),
}
