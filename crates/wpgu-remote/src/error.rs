//! Error types for wpgu-remote

/// Result type for wpgu-remote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to remote services
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an unexpected status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be understood
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// A URL could not be built
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Pull requests are only supported on GitHub
    #[error("Unsupported git provider '{host}', only github.com is supported")]
    UnsupportedProvider { host: String },

    #[error(transparent)]
    Fs(#[from] wpgu_fs::Error),
}

impl Error {
    /// Status error from a failed response, keeping a short body excerpt.
    pub(crate) fn status(response: reqwest::blocking::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        Self::Status {
            status,
            body: excerpt(&body),
        }
    }
}

fn excerpt(body: &str) -> String {
    const LIMIT: usize = 200;
    let body = body.trim();
    match body.char_indices().nth(LIMIT) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
