//! Named prompt templates.
//!
//! A template is plain text that primes the conversation. Lookups that
//! miss are not errors: callers fall back to using the name itself as
//! literal prompt text.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Source of named prompt templates.
pub trait PromptStore {
    /// Template names, sorted.
    fn list(&self) -> Vec<String>;

    /// Template text, or `None` if there is no template by that name.
    fn load(&self, name: &str) -> Option<String>;
}

const BUNDLED: &[(&str, &str)] = &[
    ("cynic", include_str!("../prompts/cynic.txt")),
    ("optimistic", include_str!("../prompts/optimistic.txt")),
    ("teacher", include_str!("../prompts/teacher.txt")),
];

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledPrompts;

impl PromptStore for BundledPrompts {
    fn list(&self) -> Vec<String> {
        BUNDLED.iter().map(|(name, _)| name.to_string()).collect()
    }

    fn load(&self, name: &str) -> Option<String> {
        BUNDLED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, text)| text.to_string())
    }
}

/// `<name>.txt` templates in a directory.
///
/// The directory is listed once when opened; files are read on demand.
#[derive(Debug, Clone)]
pub struct DirPrompts {
    dir: PathBuf,
    names: Vec<String>,
}

impl DirPrompts {
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "txt") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        debug!(dir = %dir.display(), count = names.len(), "prompt directory listed");
        Ok(Self { dir, names })
    }
}

impl PromptStore for DirPrompts {
    fn list(&self) -> Vec<String> {
        self.names.clone()
    }

    fn load(&self, name: &str) -> Option<String> {
        if !self.names.iter().any(|n| n == name) {
            return None;
        }
        let path = self.dir.join(format!("{name}.txt"));
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("failed to read prompt {}: {e}", path.display());
                None
            }
        }
    }
}
