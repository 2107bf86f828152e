//! Error types for wpgu-core

/// Result type for wpgu-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wpgu-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown comparison operator token
    #[error("Invalid comparison operator: '{operator}'")]
    InvalidOperator { operator: String },

    /// The registry could not be queried or answered unexpectedly
    #[error("Registry lookup for {kind} '{slug}' failed: {message}")]
    Registry {
        kind: String,
        slug: String,
        message: String,
    },

    /// An update artifact could not be downloaded
    #[error("Download of {url} failed: {message}")]
    Download { url: String, message: String },

    /// The pull request could not be opened
    #[error("Pull request for branch '{head}' failed: {message}")]
    PullRequest { head: String, message: String },

    /// The usage endpoint rejected or failed the report
    #[error("Usage reporting failed: {message}")]
    Usage { message: String },

    // Transparent wrappers for underlying crate errors
    #[error(transparent)]
    Fs(#[from] wpgu_fs::Error),

    #[error(transparent)]
    Git(#[from] wpgu_git::Error),

    #[error(transparent)]
    Meta(#[from] wpgu_meta::Error),
}
