//! Test doubles for the generator and prompt store.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chatline_ai::{AiError, GenerationInput, Generator, Parameters, PromptStore};

/// What the generator was asked, flattened for assertions.
#[derive(Debug, Clone)]
pub(crate) struct Request {
    pub input: String,
    pub params: Parameters,
}

/// Replies with scripted candidates, one list per call.
pub(crate) struct StubGenerator {
    replies: Mutex<VecDeque<Result<Vec<String>, AiError>>>,
    requests: Mutex<Vec<Request>>,
}

impl StubGenerator {
    pub(crate) fn new(replies: Vec<Vec<&str>>) -> Self {
        let replies = replies
            .into_iter()
            .map(|r| Ok(r.into_iter().map(String::from).collect()))
            .collect();
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(AiError::RateLimited)])),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for StubGenerator {
    async fn generate(
        &self,
        input: GenerationInput<'_>,
        params: &Parameters,
    ) -> Result<Vec<String>, AiError> {
        let input = match input {
            GenerationInput::Completion { prompt } => prompt.to_string(),
            GenerationInput::Edit { input, instruction } => format!("{input}|{instruction}"),
            GenerationInput::Chat { messages } => messages
                .iter()
                .map(|m| format!("{}: {}", m.role, m.content))
                .collect::<Vec<_>>()
                .join("\n"),
        };
        self.requests.lock().unwrap().push(Request {
            input,
            params: params.clone(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// In-memory prompt templates.
#[derive(Default)]
pub(crate) struct MapPrompts(pub BTreeMap<String, String>);

impl MapPrompts {
    pub(crate) fn with(entries: &[(&str, &str)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl PromptStore for MapPrompts {
    fn list(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    fn load(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}
