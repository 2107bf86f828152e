//! Error types for wpgu-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] wpgu_fs::Error),

    #[error("Configuration not found at {path}; run `wpgitupdater init` to create one")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error(
        "Configuration version \"{version}\" is unsupported by updater {updater}; supported versions: {supported}"
    )]
    UnsupportedVersion {
        version: String,
        updater: String,
        supported: String,
    },

    #[error("Environment variable {variable} is not set")]
    MissingToken { variable: String },

    #[error("Refusing to overwrite existing file {path}")]
    AlreadyExists { path: PathBuf },
}
