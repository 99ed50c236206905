use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpdxifyError};

const CONFIG_FILE: &str = ".spdxify.json";
const ID_TAG: &str = "SPDX-License-Identifier:";
const ID_PLACEHOLDER: &str = "SPDX";

/// Configuration for a run of spdxify
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Comment settings keyed by file suffix (compared as-is, so keys
    /// usually begin with a period)
    #[serde(default)]
    pub filetypes: BTreeMap<String, ConfigFiletype>,

    #[serde(default)]
    pub skip: ConfigSkip,

    /// Set by a one-shot run; only files ending with this suffix are selected
    #[serde(skip)]
    pub only_suffix: Option<String>,
}

/// How identifiers are written for one file type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFiletype {
    /// Comment format with `SPDX` marking where the identifier goes,
    /// e.g. `// SPDX` or `/* SPDX */`. Empty means plain text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,

    /// Do not insert on the first line if it begins with this prefix
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub skip_first_if_prefix: String,
}

/// The "skip" section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSkip {
    /// Suffixes of files to skip
    #[serde(default)]
    pub filetypes: Vec<String>,

    /// Ignore patterns for directories or files (`/vendor/`, `**/.git/`, ...)
    #[serde(default)]
    pub dirs: Vec<String>,
}

/// Single-format overrides given on the command line
#[derive(Debug, Clone, Default)]
pub struct OneShot {
    pub extension: String,
    pub comment: String,
    pub prefix: String,
}

impl ConfigFiletype {
    /// Render the identifier line for `license_id` in this comment format
    pub fn render(&self, license_id: &str) -> String {
        let id_line = format!("{} {}", ID_TAG, license_id);
        if self.comment.is_empty() {
            return id_line;
        }
        if self.comment.contains(ID_PLACEHOLDER) {
            self.comment.replacen(ID_PLACEHOLDER, &id_line, 1)
        } else {
            format!("{} {}", self.comment, id_line)
        }
    }
}

impl Config {
    /// Default config location (~/.spdxify.json)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(SpdxifyError::HomeNotFound)?;
        Ok(home.join(CONFIG_FILE))
    }

    /// Load config from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SpdxifyError::ConfigNotFound { path: path.clone() },
            _ => SpdxifyError::ConfigRead {
                path: path.clone(),
                source: e,
            },
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|e| SpdxifyError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            path = %path.display(),
            filetypes = config.filetypes.len(),
            skip_suffixes = config.skip.filetypes.len(),
            skip_patterns = config.skip.dirs.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Merge command-line overrides for a single-format run
    pub fn apply_one_shot(&mut self, one_shot: OneShot) {
        if one_shot.extension.is_empty() {
            return;
        }

        let entry = self
            .filetypes
            .entry(one_shot.extension.clone())
            .or_default();
        if !one_shot.comment.is_empty() {
            entry.comment = one_shot.comment;
        }
        if !one_shot.prefix.is_empty() {
            entry.skip_first_if_prefix = one_shot.prefix;
        }
        self.only_suffix = Some(one_shot.extension);
    }

    /// Filetype settings for `path`, picking the longest matching suffix
    pub fn filetype_for(&self, path: &str) -> Option<&ConfigFiletype> {
        self.filetypes
            .iter()
            .filter(|(suffix, _)| !suffix.is_empty() && path.ends_with(suffix.as_str()))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(_, ft)| ft)
    }
}
