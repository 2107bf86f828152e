//! Error types for wpgu-git

use std::path::PathBuf;

/// Result type for wpgu-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wpgu-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] wpgu_fs::Error),

    #[error("Not a git repository: .git not found at {path}")]
    NotARepository { path: PathBuf },

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}: {stderr}", code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("HEAD is detached; check out a branch before running updates")]
    DetachedHead,

    #[error("Remote '{name}' not found")]
    RemoteNotFound { name: String },

    #[error("Git config backup not found at {path}")]
    BackupMissing { path: PathBuf },
}
