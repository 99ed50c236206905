use std::fmt;

use crate::config::Config;
use crate::error::{Result, SpdxifyError};

/// What should happen to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do: no license wanted, or the wanted one is already there
    Skip,
    /// No identifier present; one should be inserted
    Add,
    /// A different identifier is present; needs a human
    Conflict,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "SKIP",
            Self::Add => "ADD",
            Self::Conflict => "CONFLICT",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide the action for a detected vs. desired identifier
pub fn decide(found_id: &str, want_id: &str) -> Action {
    if want_id.is_empty() || found_id == want_id {
        Action::Skip
    } else if found_id.is_empty() {
        Action::Add
    } else {
        Action::Conflict
    }
}

/// Everything known about one selected file and what to do with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    name: String,
    found_id: String,
    want_id: String,
    line: usize,
    action: Action,
}

impl FileRecord {
    /// Path relative to the repository root; unique within a run
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn found_id(&self) -> &str {
        &self.found_id
    }

    pub fn want_id(&self) -> &str {
        &self.want_id
    }

    /// Zero-based line the identifier goes before (only meaningful for `Add`)
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

/// Build the record for `path`. An absent `found_id` counts as no identifier.
pub fn resolve(path: &str, found_id: Option<&str>, want_id: &str) -> FileRecord {
    resolve_at(path, found_id, want_id, 0)
}

/// Like [`resolve`], with the insertion line already worked out by the caller
pub fn resolve_at(path: &str, found_id: Option<&str>, want_id: &str, line: usize) -> FileRecord {
    let found_id = found_id.unwrap_or_default();
    let action = decide(found_id, want_id);
    FileRecord {
        name: path.to_string(),
        found_id: found_id.to_string(),
        want_id: want_id.to_string(),
        line: if action == Action::Add { line } else { 0 },
        action,
    }
}

/// License wanted for `path` according to the config.
///
/// Config files carry no per-path license mapping yet, so this always fails;
/// pass the license on the command line instead.
pub fn lookup_license(_config: &Config, path: &str) -> Result<String> {
    Err(SpdxifyError::Resolution {
        path: path.to_string(),
    })
}
