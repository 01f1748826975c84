mod cli;
mod context;
mod files;
mod once;
mod repl;
mod template;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use chatline_ai::{BundledPrompts, DirPrompts, OpenAiClient, OpenAiConfig, PromptStore};
use chatline_common::{ChatlineError, Result};
use chatline_config::ChatlineConfig;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use context::{ContextOptions, Startup};
use repl::{Repl, INTERACTIVE_HELP};

const DEFAULT_LOG_DIRECTIVE: &str = "chatline=warn";

fn init_logging(directive: &str) {
    let directive: Directive = directive.parse().unwrap_or_else(|_| {
        eprintln!("invalid log directive {directive:?}, using {DEFAULT_LOG_DIRECTIVE}");
        DEFAULT_LOG_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| LevelFilter::WARN.into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(io::stderr)
        .init();
}

/// Prompt templates: `--prompt-dir` (or its env var), then the config, then
/// the bundled set.
fn prompt_store(
    args: &cli::Args,
    config: &ChatlineConfig,
) -> Result<Box<dyn PromptStore>> {
    let dir = args
        .prompt_dir
        .clone()
        .or_else(|| config.prompts.dir.as_ref().map(Into::into));

    match dir {
        Some(dir) => {
            let store = DirPrompts::open(&dir).map_err(|source| ChatlineError::ReadFile {
                path: dir.clone(),
                source,
            })?;
            tracing::debug!("using prompts from {}", dir.display());
            Ok(Box::new(store))
        }
        None => Ok(Box::new(BundledPrompts)),
    }
}

async fn run(args: cli::Args, config: ChatlineConfig) -> Result<()> {
    let prompts = prompt_store(&args, &config)?;
    let parameters = args.parameters(&config.defaults);
    let mode = args.mode(&parameters.model);
    tracing::debug!(mode = mode.name(), model = %parameters.model, "session mode selected");

    let opts = ContextOptions {
        prompt: args.prompt.clone(),
        file: args.file.clone(),
        question: args.question.clone(),
        interactive: args.interactive,
        mode,
        parameters,
    };
    let session = match context::assemble(opts, prompts.as_ref(), io::stdin().lock())? {
        Startup::Print(text) => {
            print!("{text}");
            return Ok(());
        }
        Startup::Session(session) => session,
    };

    let api = &config.api;
    let client_config = OpenAiConfig::from_env(&api.key_env)
        .map_err(|e| ChatlineError::MissingCredential(e.to_string()))?
        .with_base_url(api.base_url.clone())
        .with_clean_prompt(args.clean)
        .with_echo(args.echo)
        .with_code_mode(args.code)
        .with_timeouts(
            Duration::from_secs(api.connect_timeout_secs),
            Duration::from_secs(api.timeout_secs),
        );
    let client = OpenAiClient::new(client_config).map_err(|e| ChatlineError::Ai(e.to_string()))?;

    if !args.interactive {
        let write_back = args.write_back_path().map(|p| p.as_path());
        return once::run_once(&session, &client, write_back, &mut io::stdout().lock()).await;
    }

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{INTERACTIVE_HELP}")?;
    writeln!(stdout, "{}", session.snapshot())?;

    let mut repl = Repl::new(session, &client, prompts.as_ref(), io::stdin().lock(), stdout);
    repl.run().await?;
    tracing::info!(bytes = repl.session().snapshot().len(), "session ended");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let loaded = chatline_config::load_config(args.config.as_deref());
    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.clone(),
        (None, Err(_)) => DEFAULT_LOG_DIRECTIVE.to_string(),
    };
    init_logging(&directive);

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        ChatlineConfig::default()
    });
    tracing::debug!("effective config: {}", chatline_config::config_to_json(&config));

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
