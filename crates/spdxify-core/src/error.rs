use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpdxifyError {
    #[error("Home directory not found; pass a config file path explicitly")]
    HomeNotFound,

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Error reading config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing JSON from config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Error walking directory: {0}")]
    Traversal(#[from] walkdir::Error),

    #[error("Error searching for existing SPDX IDs: {message}")]
    Search { message: String },

    #[error("Error searching for existing SPDX IDs: package '{name}' not found in document")]
    SearchPackageNotFound { name: String },

    #[error("Cannot determine license for {path}: per-file license lookup is not yet implemented")]
    Resolution { path: String },

    #[error("{count} file(s) carry a different license identifier and need manual resolution")]
    Conflicts { count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpdxifyError>;

impl SpdxifyError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::HomeNotFound
            | Self::ConfigNotFound { .. }
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. } => 2,
            Self::Traversal(_) => 3,
            Self::Search { .. } | Self::SearchPackageNotFound { .. } => 4,
            Self::Resolution { .. } => 5,
            Self::Conflicts { .. } => 6,
            Self::Io(_) => 1,
        }
    }
}
