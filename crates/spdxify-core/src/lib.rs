//! Decide, file by file, whether a repository needs SPDX short-form license
//! identifiers added, already has them, or carries conflicting ones.

pub mod action;
pub mod config;
pub mod error;
pub mod pattern;
pub mod plan;
pub mod search;
pub mod selector;

pub use action::{decide, lookup_license, resolve, resolve_at, Action, FileRecord};
pub use config::{Config, ConfigFiletype, ConfigSkip, OneShot};
pub use error::{Result, SpdxifyError};
pub use pattern::{IgnorePattern, PathMatcher};
pub use plan::{choose_actions, insertion_line, Plan};
pub use search::{IdentifierSearch, SpdxIdSearcher};
pub use selector::{select_files, FileSelector};
