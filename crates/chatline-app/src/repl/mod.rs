//! Interactive session loop.
//!
//! Reads one line at a time, applies commands to the session, and sends
//! everything else to the generator. Each turn waits for its response
//! before the next line is read.

mod command;
mod select;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

use std::io::{self, BufRead, Write};
use std::path::Path;

use chatline_ai::{is_chat_model, Generator, Parameter, PromptStore, Session};
use chatline_common::{ChatlineError, Result};
use tracing::debug;

use crate::files;
use crate::template::{self, PromptRequest, PROMPT_USAGE};

pub use command::Command;
pub use select::format_candidates;
use select::Selection;

pub const INTERACTIVE_HELP: &str = "starting interactive session...
  'quit' to exit
  'clear' to empty the context
  'context' to show the context
  'prompt <arg>' to list, view or set the prompt
  'save <filename>' to preserve
  'model' to change the selected model
  'tokens' to change the MaxToken param
  'count' to change number of responses
  'temp'  set the temperature param  [0.0,2.0]
  'topp'  set the TopP param         [0.0,1.0]
  'pres'  set the Presence Penalty   [-2.0,2.0]
  'freq'  set the Frequency Penalty  [-2.0,2.0]
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    AwaitingInput,
    Terminated,
}

pub struct Repl<'a, R, W> {
    session: Session,
    generator: &'a dyn Generator,
    prompts: &'a dyn PromptStore,
    input: R,
    output: W,
    state: LoopState,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(
        session: Session,
        generator: &'a dyn Generator,
        prompts: &'a dyn PromptStore,
        input: R,
        output: W,
    ) -> Self {
        Self {
            session,
            generator,
            prompts,
            input,
            output,
            state: LoopState::AwaitingInput,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.output)
    }

    /// Run until end of input or a quit command.
    ///
    /// Only generation failures and broken stdio end the loop with an error.
    pub async fn run(&mut self) -> Result<()> {
        while self.state() == LoopState::AwaitingInput {
            self.step().await?;
        }
        Ok(())
    }

    /// Read and handle one line.
    pub async fn step(&mut self) -> Result<LoopState> {
        if self.state == LoopState::Terminated {
            return Ok(self.state);
        }

        write!(self.output, "> ")?;
        self.output.flush()?;

        match read_line(&mut self.input)? {
            Some(line) => self.dispatch(&line).await?,
            None => self.state = LoopState::Terminated,
        }
        Ok(self.state)
    }

    async fn dispatch(&mut self, line: &str) -> Result<()> {
        match Command::parse(line) {
            Command::Empty => {}
            Command::Quit => self.state = LoopState::Terminated,
            Command::Clear => {
                self.session.clear();
                debug!("context cleared");
            }
            Command::Context => self.show_context()?,
            Command::Prompt(arg) => self.prompt(arg)?,
            Command::Save(path) => self.save(path)?,
            Command::Param { param, value } => self.param(param, value)?,
            Command::Content(text) => self.content_turn(text).await?,
        }
        Ok(())
    }

    fn show_context(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== Current Context =====")?;
        writeln!(self.output, "{}", self.session.snapshot())?;
        writeln!(self.output, "===========================\n")
    }

    fn prompt(&mut self, arg: Option<&str>) -> io::Result<()> {
        let Some(arg) = arg else {
            return writeln!(self.output, "{PROMPT_USAGE}");
        };

        match PromptRequest::parse(arg) {
            PromptRequest::List => write!(self.output, "{}", template::listing(self.prompts)),
            PromptRequest::View(name) => match self.prompts.load(name) {
                Some(text) => writeln!(self.output, "{text}"),
                None => writeln!(self.output, "no predefined prompt named {name}"),
            },
            PromptRequest::Use(arg) => {
                let (text, found) = template::resolve(self.prompts, arg);
                if !found {
                    writeln!(self.output, "no predefined prompt found, using custom text")?;
                }
                writeln!(self.output, "setting prompt to:\n{text}")?;
                self.session.set_prompt(&text);
                Ok(())
            }
        }
    }

    fn save(&mut self, path: Option<&str>) -> io::Result<()> {
        let Some(path) = path else {
            return writeln!(self.output, "save requires a filename");
        };
        writeln!(self.output, "saving session to {path}")?;
        if let Err(e) = files::save_snapshot(Path::new(path), &self.session.snapshot()) {
            writeln!(self.output, "{e}")?;
        }
        Ok(())
    }

    fn param(&mut self, param: Parameter, value: Option<&str>) -> io::Result<()> {
        let Some(raw) = value else {
            let current = self.session.parameters().get(param);
            return writeln!(self.output, "{param} is set to {current}");
        };

        if param == Parameter::Model && is_chat_model(raw) != self.session.mode().is_chat() {
            let current = self.session.parameters().get(param);
            return writeln!(
                self.output,
                "model {raw} does not fit a {} session, keeping {current}",
                self.session.mode().name()
            );
        }

        match self.session.parameters_mut().set(param, raw) {
            Ok(()) => {
                let current = self.session.parameters().get(param);
                debug!(%param, value = %current, "parameter changed");
                writeln!(self.output, "{param} is now {current}")
            }
            Err(e) => writeln!(self.output, "{e}"),
        }
    }

    async fn content_turn(&mut self, text: &str) -> Result<()> {
        self.session.push_user_turn(text);

        let mut candidates = self
            .generator
            .generate(self.session.generation_input(), self.session.parameters())
            .await
            .map_err(|e| ChatlineError::Ai(e.to_string()))?;

        let chosen = if candidates.len() > 1 {
            writeln!(self.output, "{}", format_candidates(&candidates))?;
            match select::choose(&mut self.input, &mut self.output, candidates.len())? {
                Selection::Chosen(i) => candidates.swap_remove(i),
                Selection::EndOfInput => {
                    self.state = LoopState::Terminated;
                    return Ok(());
                }
            }
        } else {
            candidates.pop().unwrap_or_default()
        };

        self.session.push_response(&chosen);
        writeln!(self.output, "{chosen}\n")?;
        Ok(())
    }
}

/// Next line without its line ending, or `None` at end of input.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub(crate) fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
