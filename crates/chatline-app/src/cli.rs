use std::path::PathBuf;

use chatline_ai::{is_chat_model, Mode, Parameters};
use chatline_config::DefaultsConfig;
use clap::Parser;

const LONG_ABOUT: &str = "\
Chat with a completion API in the console.

Examples:
  # start an interactive session
  chatline -i

  # ask for a one-time response
  chatline -q \"answer me this...\"

  # provide context to a question or conversation
  chatline context.txt -i
  chatline context.txt -q \"answer me this...\"

  # read prompt from file and --write response back
  chatline convo.txt
  chatline convo.txt --write

  # pipe content from another program, useful for ! in vim visual mode
  cat convo.txt | chatline

  # inspect the predefined prompts, which set the model's mood
  chatline -p list
  chatline -p view:<name>

  # use a prompt with any of the previous modes
  chatline -p optimistic -i
  chatline -p cynic -q \"Is the world going to be ok?\"

  # edit mode: the question is the instruction
  chatline notes.txt -e -q \"fix the spelling\"

  # chat mode, also selected by chat models such as gpt-3.5-turbo
  chatline --chat -i";

/// Console client for text completion, edit and chat APIs.
#[derive(Parser, Debug)]
#[command(name = "chatline", version, about, long_about = LONG_ABOUT)]
pub struct Args {
    /// Context file; read from stdin when absent and not interactive.
    pub file: Option<PathBuf>,

    /// Ask a single question and print the response back.
    #[arg(short = 'q', long)]
    pub question: Option<String>,

    /// Prompt template: 'list', 'view:<name>', '<name>', or any custom text.
    #[arg(short = 'p', long)]
    pub prompt: Option<String>,

    /// Directory of custom prompts; bundled prompts are used when unset.
    #[arg(short = 'P', long, env = "CHATGPT_PROMPT_DIR")]
    pub prompt_dir: Option<PathBuf>,

    /// Start an interactive session.
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Request an edit of the context, using the question as instruction.
    #[arg(short = 'e', long)]
    pub edit: bool,

    /// Request code completion.
    #[arg(short = 'c', long)]
    pub code: bool,

    /// Use role-based chat completion.
    #[arg(long)]
    pub chat: bool,

    /// Remove excess whitespace from the prompt before sending.
    #[arg(short = 'x', long)]
    pub clean: bool,

    /// Append the response to the end of the context file.
    #[arg(short = 'w', long)]
    pub write: bool,

    /// Echo back the prompt, useful for vim coding.
    #[arg(short = 'E', long)]
    pub echo: bool,

    /// Max tokens to generate per response.
    #[arg(short = 'T', long, allow_negative_numbers = true)]
    pub tokens: Option<i32>,

    /// Number of response options to create.
    #[arg(short = 'C', long, allow_negative_numbers = true)]
    pub count: Option<i32>,

    /// Temperature [0.0, 2.0].
    #[arg(long, allow_negative_numbers = true)]
    pub temp: Option<f64>,

    /// Nucleus sampling TopP [0.0, 1.0].
    #[arg(long, allow_negative_numbers = true)]
    pub topp: Option<f64>,

    /// Presence penalty [-2.0, 2.0].
    #[arg(long, allow_negative_numbers = true)]
    pub pres: Option<f64>,

    /// Frequency penalty [-2.0, 2.0].
    #[arg(long, allow_negative_numbers = true)]
    pub freq: Option<f64>,

    /// Model to use.
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. chatline=debug).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Generation parameters: flags over config defaults.
    pub fn parameters(&self, defaults: &DefaultsConfig) -> Parameters {
        Parameters {
            model: self.model.clone().unwrap_or_else(|| defaults.model.clone()),
            max_tokens: self.tokens.unwrap_or(defaults.max_tokens),
            count: self.count.unwrap_or(defaults.count),
            temperature: self.temp.unwrap_or(defaults.temperature),
            top_p: self.topp.unwrap_or(defaults.top_p),
            presence_penalty: self.pres.unwrap_or(defaults.presence_penalty),
            frequency_penalty: self.freq.unwrap_or(defaults.frequency_penalty),
        }
    }

    /// Session mode. Edit wins over code, code forces plain completion,
    /// then `--chat` or a chat model selects chat.
    pub fn mode(&self, model: &str) -> Mode {
        if self.edit {
            Mode::Edit {
                instruction: self.question.clone().unwrap_or_default(),
            }
        } else if self.code {
            Mode::Completion
        } else if self.chat || is_chat_model(model) {
            Mode::Chat
        } else {
            Mode::Completion
        }
    }

    /// File the response is appended to, when write-back applies.
    pub fn write_back_path(&self) -> Option<&PathBuf> {
        self.file.as_ref().filter(|_| self.write)
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("chatline").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config_defaults() {
        let args = parse_from(&["-T", "64", "--temp", "0.1", "-m", "gpt-4"]);
        let params = args.parameters(&DefaultsConfig::default());
        assert_eq!(params.max_tokens, 64);
        assert_eq!(params.temperature, 0.1);
        assert_eq!(params.model, "gpt-4");
        assert_eq!(params.count, 1);
        assert_eq!(params.top_p, 1.0);
    }

    #[test]
    fn config_defaults_apply_without_flags() {
        let defaults = DefaultsConfig {
            count: 4,
            presence_penalty: 0.5,
            ..DefaultsConfig::default()
        };
        let params = parse_from(&[]).parameters(&defaults);
        assert_eq!(params.count, 4);
        assert_eq!(params.presence_penalty, 0.5);
    }

    #[test]
    fn negative_numbers_are_values() {
        let args = parse_from(&["--pres", "-1.5", "-T", "-1"]);
        assert_eq!(args.pres, Some(-1.5));
        assert_eq!(args.tokens, Some(-1));
    }

    #[test]
    fn short_flags_and_file() {
        let args = parse_from(&["convo.txt", "-i", "-e", "-x", "-w", "-C", "3", "-q", "why?"]);
        assert_eq!(args.file, Some(PathBuf::from("convo.txt")));
        assert!(args.interactive && args.edit && args.clean && args.write);
        assert_eq!(args.count, Some(3));
        assert_eq!(args.question.as_deref(), Some("why?"));
        assert_eq!(args.write_back_path(), Some(&PathBuf::from("convo.txt")));
    }

    #[test]
    fn mode_precedence() {
        let edit = parse_from(&["-e", "-c", "--chat", "-q", "fix it"]);
        assert_eq!(
            edit.mode("gpt-4"),
            Mode::Edit {
                instruction: "fix it".into()
            }
        );
        assert_eq!(parse_from(&["-c", "--chat"]).mode("gpt-4"), Mode::Completion);
        assert_eq!(parse_from(&["--chat"]).mode("text-davinci-003"), Mode::Chat);
        assert_eq!(parse_from(&[]).mode("gpt-3.5-turbo"), Mode::Chat);
        assert_eq!(parse_from(&[]).mode("text-davinci-003"), Mode::Completion);
    }

    #[test]
    fn write_back_needs_a_file() {
        assert_eq!(parse_from(&["-w"]).write_back_path(), None);
        assert_eq!(parse_from(&["convo.txt"]).write_back_path(), None);
    }
}
