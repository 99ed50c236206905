use std::path::Path;

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Result;
use crate::pattern::PathMatcher;

/// Walks a repository and picks the files that are candidates for an identifier
#[derive(Debug, Clone, Default)]
pub struct FileSelector {
    skip_suffixes: Vec<String>,
    matcher: PathMatcher,
    only_suffix: Option<String>,
}

impl FileSelector {
    pub fn new<S: AsRef<str>>(skip_suffixes: &[S], skip_patterns: &[S]) -> Self {
        Self {
            skip_suffixes: skip_suffixes
                .iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            matcher: PathMatcher::new(skip_patterns),
            only_suffix: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut selector = Self::new(&config.skip.filetypes, &config.skip.dirs);
        selector.only_suffix = config.only_suffix.clone();
        selector
    }

    /// Select eligible files under `root`, as paths relative to it.
    ///
    /// Skip suffixes are tested against the full walked path while ignore
    /// patterns see the root-relative form with its leading `/` (so `/src/`
    /// anchors at the root). Directories, symlinks and empty files are
    /// dropped. Entries come back in walk order (sorted by name per
    /// directory). The first walk error aborts the whole selection.
    pub fn select(&self, root: &Path) -> Result<Vec<String>> {
        let root_str = normalize_separators(root);
        let prefix = root_str.strip_suffix('/').unwrap_or(&root_str);

        let mut paths = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;

            // Names that are not UTF-8 cannot be matched or keyed
            let Some(full) = entry.path().to_str().map(|p| p.replace('\\', "/")) else {
                tracing::warn!(path = %entry.path().display(), "skipped path that is not valid UTF-8");
                continue;
            };

            // Check skip suffixes against the full path
            if self.is_suffix_match(&full) {
                tracing::debug!(path = %full, "skipped by suffix");
                continue;
            }

            let short = full.strip_prefix(prefix).unwrap_or(&full);

            // Check ignore patterns against the root-relative path
            if let Some(pattern) = self.matcher.find_match(short) {
                tracing::debug!(path = %short, %pattern, "skipped by ignore pattern");
                continue;
            }

            // Only non-empty regular files remain
            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if file_type.is_symlink() {
                tracing::debug!(path = %short, "skipped symbolic link");
                continue;
            }
            if entry.metadata()?.len() == 0 {
                tracing::debug!(path = %short, "skipped empty file");
                continue;
            }

            // One-shot runs keep a single extension
            if let Some(only) = &self.only_suffix {
                if !short.ends_with(only.as_str()) {
                    continue;
                }
            }

            let relative = short.strip_prefix('/').unwrap_or(short);
            paths.push(relative.to_string());
        }

        tracing::info!(root = %root.display(), selected = paths.len(), "selected files");
        Ok(paths)
    }

    fn is_suffix_match(&self, path: &str) -> bool {
        self.skip_suffixes
            .iter()
            .any(|suffix| path.ends_with(suffix.as_str()))
    }
}

/// Select eligible files under `root` with explicit skip lists
pub fn select_files<S: AsRef<str>>(
    root: &Path,
    skip_suffixes: &[S],
    skip_patterns: &[S],
) -> Result<Vec<String>> {
    FileSelector::new(skip_suffixes, skip_patterns).select(root)
}

fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::config::OneShot;
    use crate::error::SpdxifyError;

    const NONE: [&str; 0] = [];

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn selects_nested_files_relative_to_root() {
        let tmp = tempfile::TempDir::new().unwrap();
        write(tmp.path(), "a.go", "package a\n");
        write(tmp.path(), "src/sub/b.go", "package b\n");

        let files = select_files(tmp.path(), &NONE, &NONE).unwrap();
        assert_eq!(files, vec!["a.go", "src/sub/b.go"]);
    }

    #[test]
    fn root_with_trailing_separator_gives_same_paths() {
        let tmp = tempfile::TempDir::new().unwrap();
        write(tmp.path(), "src/main.rs", "fn main() {}\n");

        let with_slash = format!("{}/", tmp.path().display());
        let files = select_files(Path::new(&with_slash), &NONE, &NONE).unwrap();
        assert_eq!(files, vec!["src/main.rs"]);
    }

    #[test]
    fn excludes_empty_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        write(tmp.path(), "empty.txt", "");
        write(tmp.path(), "full.txt", "content\n");

        let files = select_files(tmp.path(), &NONE, &NONE).unwrap();
        assert_eq!(files, vec!["full.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn excludes_symlinks_even_to_eligible_targets() {
        let tmp = tempfile::TempDir::new().unwrap();
        write(tmp.path(), "real.go", "package real\n");
        std::os::unix::fs::symlink(tmp.path().join("real.go"), tmp.path().join("link.go")).unwrap();
        fs::create_dir(tmp.path().join("dir")).unwrap();
        write(tmp.path(), "dir/inner.go", "package inner\n");
        std::os::unix::fs::symlink(tmp.path().join("dir"), tmp.path().join("linkdir")).unwrap();

        let files = select_files(tmp.path(), &NONE, &NONE).unwrap();
        assert_eq!(files, vec!["dir/inner.go", "real.go"]);
    }

    #[test]
    fn skip_suffix_checks_full_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        write(tmp.path(), "data.json", "{}\n");
        write(tmp.path(), "main.go", "package main\n");
        write(tmp.path(), "README.md", "# hi\n");

        let files = select_files(tmp.path(), &[".json", ".md"], &[]).unwrap();
        assert_eq!(files, vec!["main.go"]);
    }

    #[test]
    fn ignore_patterns_see_leading_separator() {
        let tmp = tempfile::TempDir::new().unwrap();
        write(tmp.path(), "vendor/c.go", "package c\n");
        write(tmp.path(), "lib/vendor/d.go", "package d\n");
        write(tmp.path(), "src/e.go", "package e\n");
        write(tmp.path(), "docs/LICENSE", "MIT\n");
        write(tmp.path(), "keep.go", "package keep\n");

        let files = select_files(
            tmp.path(),
            &NONE.map(String::from),
            &["**vendor/".to_string(), "/src/".to_string(), "/docs/LICENSE".to_string()],
        )
        .unwrap();
        assert_eq!(files, vec!["keep.go"]);
    }

    #[test]
    fn unanchored_dir_pattern_never_matches_walked_paths() {
        let tmp = tempfile::TempDir::new().unwrap();
        write(tmp.path(), "src/e.go", "package e\n");

        let files = select_files(tmp.path(), &[], &["src/"]).unwrap();
        assert_eq!(files, vec!["src/e.go"]);
    }

    #[test]
    fn from_config_applies_one_shot_restriction() {
        let tmp = tempfile::TempDir::new().unwrap();
        write(tmp.path(), "run.sh", "#!/bin/sh\necho hi\n");
        write(tmp.path(), "main.go", "package main\n");

        let mut config = Config::default();
        config.apply_one_shot(OneShot {
            extension: ".sh".to_string(),
            ..OneShot::default()
        });

        let files = FileSelector::from_config(&config).select(tmp.path()).unwrap();
        assert_eq!(files, vec!["run.sh"]);
    }

    // macOS filesystems reject names that are not UTF-8
    #[cfg(target_os = "linux")]
    #[test]
    fn skips_names_that_are_not_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempfile::TempDir::new().unwrap();
        write(tmp.path(), "a.go", "package a\n");
        fs::write(tmp.path().join(OsStr::from_bytes(b"\xffbad.go")), "package bad\n").unwrap();

        let files = select_files(tmp.path(), &NONE, &NONE).unwrap();
        assert_eq!(files, vec!["a.go"]);
    }

    #[test]
    fn missing_root_is_traversal_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = select_files(&tmp.path().join("nope"), &NONE, &NONE).unwrap_err();
        assert!(matches!(err, SpdxifyError::Traversal(_)));
    }
}
