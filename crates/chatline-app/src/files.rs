//! Context file reading and response persistence.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chatline_common::{ChatlineError, Result};

pub fn read_context(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ChatlineError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Append `data` to `path`, creating the file if needed.
pub fn append_to_file(path: &Path, data: &str) -> Result<()> {
    let to_err = |source| ChatlineError::WriteFile {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(to_err)?;
    file.write_all(data.as_bytes()).map_err(to_err)?;
    file.flush().map_err(to_err)
}

/// Write a session snapshot, replacing any previous contents.
pub fn save_snapshot(path: &Path, snapshot: &str) -> Result<()> {
    std::fs::write(path, snapshot).map_err(|source| ChatlineError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
