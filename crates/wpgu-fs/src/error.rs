//! Error types for wpgu-fs

use std::path::PathBuf;

/// Result type for wpgu-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wpgu-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid archive {path}: {message}")]
    Archive { path: PathBuf, message: String },

    #[error("Archive entry '{entry}' resolves outside of {root}")]
    PathTraversal { entry: String, root: PathBuf },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    Glob { pattern: String, message: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
