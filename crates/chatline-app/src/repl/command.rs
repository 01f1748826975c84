//! Classification of one interactive input line.

use chatline_ai::Parameter;

/// One line of interactive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Blank or whitespace-only line.
    Empty,
    Quit,
    Clear,
    Context,
    /// Everything after `prompt`, if anything.
    Prompt(Option<&'a str>),
    Save(Option<&'a str>),
    /// Query (`value` absent) or set a generation parameter.
    Param {
        param: Parameter,
        value: Option<&'a str>,
    },
    /// Anything else is sent to the model.
    Content(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Command::Empty;
        };

        match head {
            "quit" | "q" | "exit" => Command::Quit,
            "clear" => Command::Clear,
            "context" => Command::Context,
            "prompt" => {
                let rest = line.trim_start()[head.len()..].trim();
                Command::Prompt((!rest.is_empty()).then_some(rest))
            }
            "save" => Command::Save(parts.next()),
            other => match Parameter::from_name(other) {
                Some(param) => Command::Param {
                    param,
                    value: parts.next(),
                },
                None => Command::Content(line),
            },
        }
    }
}
