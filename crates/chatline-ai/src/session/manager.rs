//! Session struct and transcript operations.

use tracing::debug;

use crate::params::Parameters;
use crate::{GenerationInput, Message, Role};

use super::types::{Mode, Transcript};

/// A single conversation: transcript, parameters and mode.
#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    transcript: Transcript,
    parameters: Parameters,
}

impl Session {
    pub fn new(mode: Mode, parameters: Parameters) -> Self {
        Self {
            transcript: Transcript::for_mode(&mode),
            mode,
            parameters,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }

    /// Append raw text. Chat sessions record it as a user message.
    pub fn append(&mut self, text: &str) {
        self.append_message(Role::User, text);
    }

    /// Append a role-tagged message.
    ///
    /// A system message always occupies index 0: it replaces an existing
    /// one there or is inserted in front. Flat sessions have no roles and
    /// take the content verbatim.
    pub fn append_message(&mut self, role: Role, content: impl Into<String>) {
        let content = content.into();
        match &mut self.transcript {
            Transcript::Flat { text, .. } => text.push_str(&content),
            Transcript::Messages(messages) => {
                let message = Message::new(role, content);
                if role != Role::System {
                    messages.push(message);
                } else if messages.first().is_some_and(|m| m.role == Role::System) {
                    messages[0] = message;
                } else {
                    messages.insert(0, message);
                }
            }
        }
    }

    /// Replace the controlling prompt, keeping the conversation after it.
    pub fn set_prompt(&mut self, prompt: &str) {
        if let Transcript::Flat { text, preamble_len } = &mut self.transcript {
            text.replace_range(..*preamble_len, prompt);
            *preamble_len = prompt.len();
        } else {
            self.append_message(Role::System, prompt);
        }
        debug!(mode = self.mode.name(), len = prompt.len(), "prompt replaced");
    }

    /// Record a line typed by the user.
    pub fn push_user_turn(&mut self, line: &str) {
        if self.mode.is_chat() {
            self.append_message(Role::User, line);
        } else {
            self.append_message(Role::User, format!("\n> {line}"));
        }
    }

    /// Record the chosen response so the next request sees it.
    pub fn push_response(&mut self, response: &str) {
        let response = response.trim();
        if self.mode.is_chat() {
            self.append_message(Role::Assistant, response);
        } else {
            self.append_message(Role::Assistant, format!("\n{response}"));
        }
    }

    /// Drop the whole transcript, including the prompt. Parameters stay.
    pub fn clear(&mut self) {
        self.transcript = Transcript::for_mode(&self.mode);
    }

    pub fn is_empty(&self) -> bool {
        match &self.transcript {
            Transcript::Flat { text, .. } => text.is_empty(),
            Transcript::Messages(messages) => messages.is_empty(),
        }
    }

    /// Chat messages, or an empty slice for flat sessions.
    pub fn messages(&self) -> &[Message] {
        match &self.transcript {
            Transcript::Flat { .. } => &[],
            Transcript::Messages(messages) => messages,
        }
    }

    /// The transcript as text, for display and saving.
    ///
    /// Chat messages are rendered one per line as `role: content`.
    pub fn snapshot(&self) -> String {
        match &self.transcript {
            Transcript::Flat { text, .. } => text.clone(),
            Transcript::Messages(messages) => messages
                .iter()
                .map(|m| format!("{}: {}", m.role, m.content))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Borrow the transcript as the payload for the next request.
    pub fn generation_input(&self) -> GenerationInput<'_> {
        match (&self.mode, &self.transcript) {
            (Mode::Chat, Transcript::Messages(messages)) => GenerationInput::Chat { messages },
            (Mode::Edit { instruction }, Transcript::Flat { text, .. }) => GenerationInput::Edit {
                input: text,
                instruction,
            },
            (_, Transcript::Flat { text, .. }) => GenerationInput::Completion { prompt: text },
            // Transcript::for_mode pairs Chat with Messages only
            (_, Transcript::Messages(messages)) => GenerationInput::Chat { messages },
        }
    }
}
