//! The `prompt` argument grammar shared by `-p` and the `prompt` command.

use chatline_ai::PromptStore;

pub const PROMPT_USAGE: &str =
    "prompt requires an argument [list, view:<prompt>, <prompt>, <custom...>]";

/// What a prompt argument asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRequest<'a> {
    /// Print the template names.
    List,
    /// Print one template.
    View(&'a str),
    /// Use a template, or the text itself when no template matches.
    Use(&'a str),
}

impl<'a> PromptRequest<'a> {
    pub fn parse(arg: &'a str) -> Self {
        if arg == "list" {
            PromptRequest::List
        } else if let Some(name) = arg.strip_prefix("view:") {
            PromptRequest::View(name)
        } else {
            PromptRequest::Use(arg)
        }
    }
}

/// Prompt text for `arg`: the template body, or `arg` itself.
///
/// The flag says whether a template was found.
pub fn resolve(prompts: &dyn PromptStore, arg: &str) -> (String, bool) {
    match prompts.load(arg) {
        Some(text) => (text, true),
        None => (arg.to_string(), false),
    }
}

/// Template names, one per line.
pub fn listing(prompts: &dyn PromptStore) -> String {
    prompts
        .list()
        .into_iter()
        .map(|name| name + "\n")
        .collect()
}
