//! Choosing one response when several candidates come back.

use std::io::{self, BufRead, Write};

use super::read_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Selection {
    Chosen(usize),
    EndOfInput,
}

/// Number each candidate as `[i]: text`, separated by blank lines.
pub fn format_candidates(candidates: &[String]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, text)| format!("[{i}]: {text}\n\n"))
        .collect()
}

/// Prompt until a valid index in `[0, count)` is entered.
///
/// Bad answers are reported and asked again; only end of input gives up.
pub(crate) fn choose<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    count: usize,
) -> io::Result<Selection> {
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(Selection::EndOfInput);
        };
        let answer = line.trim();

        match answer.parse::<i64>() {
            Err(e) => writeln!(output, "invalid choice {answer:?}: {e}")?,
            Ok(n) => match usize::try_from(n).ok().filter(|&i| i < count) {
                Some(i) => return Ok(Selection::Chosen(i)),
                None => writeln!(
                    output,
                    "choice must be between 0 and {}",
                    count.saturating_sub(1)
                )?,
            },
        }
    }
}
