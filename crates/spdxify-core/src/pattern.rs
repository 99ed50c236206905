//! Ignore patterns for paths relative to the scan root.
//!
//! A pattern is split at its last `/` into a directory part and a file part.
//! A directory part beginning with `**` matches anywhere in the candidate's
//! directory (plain substring test); otherwise it is anchored at the start.
//! An empty file part means "everything under the directory".
//!
//! Only the leading `**` is special. Other `*` and `?` characters are
//! compared literally, which keeps existing configuration files working as
//! they always have.

use std::fmt;

const ANY_DEPTH: &str = "**";
const SEP: char = '/';

/// One compiled ignore pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnorePattern {
    /// `docs/LICENSE`: directory equals `dir` and file name equals `file`
    DepthSensitiveFile { dir: String, file: String },
    /// `src/`: directory starts with `dir`
    DepthSensitiveDir { dir: String },
    /// `**/LICENSE`: file name equals `file` in any directory
    DepthInsensitiveRootFile { file: String },
    /// `**vendor/LICENSE`: directory contains `dir` and file name equals `file`
    DepthInsensitiveFile { dir: String, file: String },
    /// `**vendor/`: directory contains `dir`
    DepthInsensitiveDir { dir: String },
}

/// Split a path into (directory including trailing `/`, file name)
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind(SEP) {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    }
}

impl IgnorePattern {
    /// Compile a raw pattern string; every string is a valid pattern
    pub fn parse(raw: &str) -> Self {
        let (dir, file) = split_path(raw);

        match dir.strip_prefix(ANY_DEPTH) {
            Some(dir) if file.is_empty() => Self::DepthInsensitiveDir {
                dir: dir.to_string(),
            },
            Some(dir) if dir.len() == 1 => Self::DepthInsensitiveRootFile {
                file: file.to_string(),
            },
            Some(dir) => Self::DepthInsensitiveFile {
                dir: dir.to_string(),
                file: file.to_string(),
            },
            None if file.is_empty() => Self::DepthSensitiveDir {
                dir: dir.to_string(),
            },
            None => Self::DepthSensitiveFile {
                dir: dir.to_string(),
                file: file.to_string(),
            },
        }
    }

    /// Test an already split candidate path
    pub fn matches(&self, cand_dir: &str, cand_file: &str) -> bool {
        match self {
            Self::DepthSensitiveFile { dir, file } => cand_dir == dir && cand_file == file,
            Self::DepthSensitiveDir { dir } => cand_dir.starts_with(dir.as_str()),
            Self::DepthInsensitiveRootFile { file } => cand_file == file,
            Self::DepthInsensitiveFile { dir, file } => {
                cand_dir.contains(dir.as_str()) && cand_file == file
            }
            Self::DepthInsensitiveDir { dir } => cand_dir.contains(dir.as_str()),
        }
    }
}

impl fmt::Display for IgnorePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthSensitiveFile { dir, file } => write!(f, "{}{}", dir, file),
            Self::DepthSensitiveDir { dir } => write!(f, "{}", dir),
            Self::DepthInsensitiveRootFile { file } => write!(f, "{}{}{}", ANY_DEPTH, SEP, file),
            Self::DepthInsensitiveFile { dir, file } => write!(f, "{}{}{}", ANY_DEPTH, dir, file),
            Self::DepthInsensitiveDir { dir } => write!(f, "{}{}", ANY_DEPTH, dir),
        }
    }
}

/// A set of ignore patterns compiled once per run
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    patterns: Vec<IgnorePattern>,
}

impl PathMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| IgnorePattern::parse(p.as_ref()))
                .collect(),
        }
    }

    /// First pattern that excludes `candidate`, if any
    pub fn find_match(&self, candidate: &str) -> Option<&IgnorePattern> {
        let (dir, file) = split_path(candidate);
        self.patterns.iter().find(|p| p.matches(dir, file))
    }

    /// Whether `candidate` should be excluded
    pub fn matches(&self, candidate: &str) -> bool {
        self.find_match(candidate).is_some()
    }
}

/// Check `candidate` against raw pattern strings without keeping a matcher
pub fn matches<S: AsRef<str>>(candidate: &str, patterns: &[S]) -> bool {
    PathMatcher::new(patterns).matches(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_path_keeps_trailing_separator() {
        assert_eq!(split_path("src/sub/b.go"), ("src/sub/", "b.go"));
        assert_eq!(split_path("/a.go"), ("/", "a.go"));
        assert_eq!(split_path("vendor/"), ("vendor/", ""));
        assert_eq!(split_path("a.go"), ("", "a.go"));
    }

    #[test]
    fn parse_picks_variant() {
        assert_eq!(
            IgnorePattern::parse("docs/LICENSE"),
            IgnorePattern::DepthSensitiveFile {
                dir: "docs/".to_string(),
                file: "LICENSE".to_string()
            }
        );
        assert_eq!(
            IgnorePattern::parse("src/"),
            IgnorePattern::DepthSensitiveDir {
                dir: "src/".to_string()
            }
        );
        assert_eq!(
            IgnorePattern::parse("**/.DS_Store"),
            IgnorePattern::DepthInsensitiveRootFile {
                file: ".DS_Store".to_string()
            }
        );
        assert_eq!(
            IgnorePattern::parse("**/vendor/LICENSE"),
            IgnorePattern::DepthInsensitiveFile {
                dir: "/vendor/".to_string(),
                file: "LICENSE".to_string()
            }
        );
        assert_eq!(
            IgnorePattern::parse("**vendor/"),
            IgnorePattern::DepthInsensitiveDir {
                dir: "vendor/".to_string()
            }
        );
    }

    #[test]
    fn display_round_trips_raw_pattern() {
        for raw in ["docs/LICENSE", "/src/", "**/.git/", "**/LICENSE", "**vendor/x.go"] {
            assert_eq!(IgnorePattern::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn depth_sensitive_dir_is_prefix_only() {
        let patterns = ["src/"];
        assert!(matches("src/a.go", &patterns));
        assert!(matches("src/sub/b.go", &patterns));
        assert!(!matches("other/src/a.go", &patterns));
    }

    #[test]
    fn depth_insensitive_dir_is_substring() {
        let patterns = ["**vendor/"];
        assert!(matches("a/vendor/x.go", &patterns));
        assert!(matches("vendor/x.go", &patterns));
        assert!(!matches("vendorish/x.go", &patterns));
        // substring, not component-aware
        assert!(matches("myvendor/x.go", &patterns));
    }

    #[test]
    fn depth_sensitive_file_is_exact() {
        let patterns = ["docs/LICENSE"];
        assert!(matches("docs/LICENSE", &patterns));
        assert!(!matches("docs/LICENSE.md", &patterns));
        assert!(!matches("docs/sub/LICENSE", &patterns));
        assert!(!matches("a/docs/LICENSE", &patterns));
        assert!(!matches("LICENSE", &patterns));
    }

    #[test]
    fn root_anchored_file_matches_any_directory() {
        let patterns = ["**/LICENSE"];
        assert!(matches("LICENSE", &patterns));
        assert!(matches("/LICENSE", &patterns));
        assert!(matches("/deep/down/LICENSE", &patterns));
        assert!(!matches("/deep/down/LICENSE.txt", &patterns));
    }

    #[test]
    fn sub_path_file_needs_directory_and_name() {
        let patterns = ["**/third_party/NOTICE"];
        assert!(matches("/third_party/NOTICE", &patterns));
        assert!(matches("/lib/third_party/x/NOTICE", &patterns));
        assert!(!matches("/lib/third_party/README", &patterns));
        assert!(!matches("/lib/NOTICE", &patterns));
    }

    #[test]
    fn wildcards_are_literal() {
        let patterns = ["src/*.go", "**?/"];
        assert!(!matches("src/a.go", &patterns));
        assert!(matches("src/*.go", &patterns));
        assert!(!matches("any/dir/x.go", &patterns));
    }

    #[test]
    fn empty_pattern_matches_everything() {
        assert!(matches("/anything/at/all.rs", &[""]));
    }

    #[test]
    fn no_patterns_ignores_nothing() {
        let empty: [&str; 0] = [];
        assert!(!matches("/a.go", &empty));
        assert!(PathMatcher::new(&empty).find_match("/vendor/x.go").is_none());
    }

    #[test]
    fn union_is_order_independent() {
        let forward = PathMatcher::new(&["**vendor/", "docs/LICENSE"]);
        let reverse = PathMatcher::new(&["docs/LICENSE", "**vendor/"]);
        for candidate in ["docs/LICENSE", "a/vendor/x.go", "src/main.go"] {
            assert_eq!(forward.matches(candidate), reverse.matches(candidate));
        }
    }

    #[test]
    fn matching_is_pure() {
        let matcher = PathMatcher::new(&["/.git/", "**/node_modules/"]);
        for _ in 0..3 {
            assert!(matcher.matches("/.git/HEAD"));
            assert!(matcher.matches("/web/node_modules/x/index.js"));
            assert!(!matcher.matches("/src/.gitignore"));
        }
    }

    #[test]
    fn find_match_reports_first_pattern() {
        let matcher = PathMatcher::new(&["**vendor/", "/vendor/"]);
        let hit = matcher.find_match("/vendor/c.go").unwrap();
        assert_eq!(hit.to_string(), "**vendor/");
    }
}
