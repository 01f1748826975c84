//! Session mode and transcript representation.

use crate::Message;

/// How each content turn is turned into a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Free-text completion over the flat transcript.
    Completion,
    /// Edit of the flat transcript, guided by a fixed instruction.
    Edit { instruction: String },
    /// Role-based chat over a message list.
    Chat,
}

impl Mode {
    pub fn is_chat(&self) -> bool {
        matches!(self, Mode::Chat)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Completion => "completion",
            Mode::Edit { .. } => "edit",
            Mode::Chat => "chat",
        }
    }
}

/// Transcript storage.
///
/// `Flat::text` starts with the controlling prompt (its first
/// `preamble_len` bytes); everything after it is conversation.
#[derive(Debug, Clone)]
pub(super) enum Transcript {
    Flat { text: String, preamble_len: usize },
    Messages(Vec<Message>),
}

impl Transcript {
    pub(super) fn for_mode(mode: &Mode) -> Self {
        if mode.is_chat() {
            Transcript::Messages(Vec::new())
        } else {
            Transcript::Flat {
                text: String::new(),
                preamble_len: 0,
            }
        }
    }
}
