//! Origin URL handling: token embedding, redaction and host/repository parsing

use std::sync::LazyLock;

use regex::Regex;

static ORIGIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // An existing `user[:pass]@` on an https origin is dropped so a
    // previously tokenised URL is rewritten cleanly.
    Regex::new(r"^(?:git@|https://)(?:[^@/]+@)?([^:/]+)[:/](.+)$")
        .expect("Invalid origin regex")
});

static LOCATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z][a-z0-9+.-]*://)?(?:[^@/]+@)?([^:/]+)(?::\d+)?[:/](.+?)(?:\.git)?/?$")
        .expect("Invalid remote location regex")
});

static CREDENTIAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(https?://[^:@/\s]+):[^@/\s]+@").expect("Invalid credential regex")
});

/// Rewrite an `origin` URL so pushes authenticate with `token`.
///
/// Accepts `git@<host>:<path>` and `https://<host>/<path>` forms and returns
/// `https://x-access-token:<token>@<host>/<path>`. Any other form (a local
/// path, `file://`) is returned as `None` and should be left untouched.
pub fn rewrite_origin_url(url: &str, token: &str) -> Option<String> {
    let captures = ORIGIN_REGEX.captures(url.trim())?;
    Some(format!(
        "https://x-access-token:{token}@{}/{}",
        &captures[1], &captures[2]
    ))
}

/// Replace the password part of any `https://user:password@` in `text`.
pub fn redact_credentials(text: &str) -> String {
    CREDENTIAL_REGEX.replace_all(text, "$1:***@").into_owned()
}

/// Host and repository path of a remote, e.g. `github.com` and `acme/site`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocation {
    pub host: String,
    pub repository: String,
}

impl RemoteLocation {
    /// Parse an scp-like or URL-style remote. Local paths yield `None`.
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim();
        if url.starts_with('/') || url.starts_with("file://") {
            return None;
        }
        let captures = LOCATION_REGEX.captures(url)?;
        Some(Self {
            host: captures[1].to_string(),
            repository: captures[2].trim_start_matches('/').to_string(),
        })
    }

    /// Whether the remote is hosted on github.com.
    pub fn is_github(&self) -> bool {
        self.host.eq_ignore_ascii_case("github.com")
    }
}
