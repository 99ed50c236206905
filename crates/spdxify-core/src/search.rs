//! Detection of SPDX identifiers already present in a repository.
//!
//! The search builds a small internal document holding one synthetic package
//! whose file list carries the concluded license for every scanned file.
//! Callers only ever see the flattened `path -> identifier` map.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Result, SpdxifyError};
use crate::selector::FileSelector;

const ID_TAG: &str = "SPDX-License-Identifier:";
const NO_ASSERTION: &str = "NOASSERTION";
const PACKAGE_NAME: &str = "internal-pkg";
const COMMENT_CLOSERS: &[&str] = &["*/", "-->", "*)", "#}", "%>"];

/// Source of the identifiers currently found in files
pub trait IdentifierSearch {
    /// Map each non-ignored file (relative to `root`) to its detected
    /// identifier, or to an empty string when none is present
    fn search_identifiers(
        &self,
        root: &Path,
        ignore_patterns: &[String],
    ) -> Result<BTreeMap<String, String>>;
}

#[derive(Debug, Clone)]
pub struct IdsFile {
    pub file_name: String,
    pub license_concluded: String,
}

#[derive(Debug, Clone)]
pub struct IdsPackage {
    pub name: String,
    pub files: Vec<IdsFile>,
}

#[derive(Debug, Clone, Default)]
pub struct IdsDocument {
    pub packages: Vec<IdsPackage>,
}

impl IdsDocument {
    pub fn package(&self, name: &str) -> Option<&IdsPackage> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Flatten the named package into `path -> identifier`
    pub fn identifiers(&self, package_name: &str) -> Result<BTreeMap<String, String>> {
        let package =
            self.package(package_name)
                .ok_or_else(|| SpdxifyError::SearchPackageNotFound {
                    name: package_name.to_string(),
                })?;

        Ok(package
            .files
            .iter()
            .map(|f| {
                let id = if f.license_concluded == NO_ASSERTION {
                    String::new()
                } else {
                    f.license_concluded.clone()
                };
                (f.file_name.clone(), id)
            })
            .collect())
    }
}

/// Scans file contents for `SPDX-License-Identifier:` lines
#[derive(Debug, Clone, Default)]
pub struct SpdxIdSearcher;

impl SpdxIdSearcher {
    pub fn new() -> Self {
        Self
    }

    /// Build the ids document for everything under `root`
    pub fn build_document(&self, root: &Path, ignore_patterns: &[String]) -> Result<IdsDocument> {
        let no_suffixes: [String; 0] = [];
        let files = FileSelector::new(&no_suffixes, ignore_patterns).select(root)?;

        let mut package = IdsPackage {
            name: PACKAGE_NAME.to_string(),
            files: Vec::with_capacity(files.len()),
        };

        for file_name in files {
            let bytes = fs::read(root.join(&file_name)).map_err(|e| SpdxifyError::Search {
                message: format!("cannot read {}: {}", file_name, e),
            })?;
            let content = String::from_utf8_lossy(&bytes);
            let license_concluded = conclude(&find_identifiers(&content));
            tracing::trace!(file = %file_name, license = %license_concluded, "searched file");
            package.files.push(IdsFile {
                file_name,
                license_concluded,
            });
        }

        Ok(IdsDocument {
            packages: vec![package],
        })
    }
}

impl IdentifierSearch for SpdxIdSearcher {
    fn search_identifiers(
        &self,
        root: &Path,
        ignore_patterns: &[String],
    ) -> Result<BTreeMap<String, String>> {
        let doc = self.build_document(root, ignore_patterns)?;
        let ids = doc.identifiers(PACKAGE_NAME)?;
        tracing::info!(
            files = ids.len(),
            with_id = ids.values().filter(|id| !id.is_empty()).count(),
            "searched for existing identifiers"
        );
        Ok(ids)
    }
}

/// Every identifier expression in `content`, in order of appearance, deduplicated
pub fn find_identifiers(content: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for line in content.lines() {
        let Some(idx) = line.find(ID_TAG) else {
            continue;
        };
        let expr = strip_comment_closers(&line[idx + ID_TAG.len()..]);
        if !expr.is_empty() && !found.iter().any(|f| f == expr) {
            found.push(expr.to_string());
        }
    }
    found
}

fn strip_comment_closers(raw: &str) -> &str {
    let mut expr = raw.trim();
    while let Some(stripped) = COMMENT_CLOSERS
        .iter()
        .find_map(|closer| expr.strip_suffix(closer))
    {
        expr = stripped.trim_end();
    }
    expr
}

/// Combine the identifiers of one file into a single concluded license
fn conclude(ids: &[String]) -> String {
    match ids {
        [] => NO_ASSERTION.to_string(),
        [only] => only.clone(),
        many => many
            .iter()
            .map(|id| {
                if id.contains(' ') {
                    format!("({})", id)
                } else {
                    id.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" AND "),
    }
}
