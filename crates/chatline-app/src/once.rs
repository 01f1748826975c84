//! Non-interactive mode: one request, then print or write back.

use std::io::Write;
use std::path::Path;

use chatline_ai::{Generator, Session};
use chatline_common::{ChatlineError, Result};
use tracing::info;

use crate::files;
use crate::repl::format_candidates;

pub async fn run_once(
    session: &Session,
    generator: &dyn Generator,
    write_back: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let candidates = generator
        .generate(session.generation_input(), session.parameters())
        .await
        .map_err(|e| ChatlineError::Ai(e.to_string()))?;

    let result = match candidates.as_slice() {
        [only] => only.clone(),
        many => format_candidates(many),
    };

    match write_back {
        Some(path) => {
            files::append_to_file(path, &result)?;
            info!("appended response to {}", path.display());
        }
        None => writeln!(out, "{result}")?,
    }
    Ok(())
}
