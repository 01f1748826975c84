//! Startup: turn flags, a context file or stdin into the first session.

use std::io::Read;
use std::path::PathBuf;

use chatline_ai::{Mode, Parameters, PromptStore, Session};
use chatline_common::{ChatlineError, Result};
use tracing::debug;

use crate::files;
use crate::template::{self, PromptRequest};

/// Inputs that shape the initial transcript.
#[derive(Debug, Clone)]
pub struct ContextOptions {
    pub prompt: Option<String>,
    pub file: Option<PathBuf>,
    pub question: Option<String>,
    pub interactive: bool,
    pub mode: Mode,
    pub parameters: Parameters,
}

/// Result of startup assembly.
#[derive(Debug)]
pub enum Startup {
    /// `-p list` / `-p view:<name>`: print this and exit.
    Print(String),
    Session(Session),
}

/// Build the initial session.
///
/// Order: prompt template, then file or stdin context, then the question.
/// In edit mode the question is the instruction and is not appended.
pub fn assemble(
    opts: ContextOptions,
    prompts: &dyn PromptStore,
    mut stdin: impl Read,
) -> Result<Startup> {
    let mut preamble = None;
    if let Some(arg) = opts.prompt.as_deref() {
        match PromptRequest::parse(arg) {
            PromptRequest::List => return Ok(Startup::Print(template::listing(prompts))),
            PromptRequest::View(name) => {
                return prompts
                    .load(name)
                    .map(Startup::Print)
                    .ok_or_else(|| ChatlineError::Prompt(format!("no prompt named {name}")));
            }
            PromptRequest::Use(arg) => {
                let (text, found) = template::resolve(prompts, arg);
                debug!(found, "startup prompt resolved");
                preamble = Some(text);
            }
        }
    }

    let mut body = String::new();
    if let Some(path) = opts.file.as_deref() {
        body.push_str(&files::read_context(path)?);
    } else if !opts.interactive {
        // piped input, e.g. a vim visual selection
        stdin.read_to_string(&mut body)?;
    }

    let is_edit = matches!(opts.mode, Mode::Edit { .. });
    if let Some(question) = opts.question.as_deref().filter(|_| !is_edit) {
        body.push('\n');
        body.push_str(question);
    }

    if opts.mode.is_chat() {
        body = body.trim().to_string();
    }

    let mut session = Session::new(opts.mode, opts.parameters);
    if let Some(preamble) = preamble {
        session.set_prompt(&preamble);
    }
    if !body.is_empty() {
        session.append(&body);
    }
    Ok(Startup::Session(session))
}
