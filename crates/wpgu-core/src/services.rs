//! Collaborators the pipeline calls out to
//!
//! The HTTP implementations live in `wpgu-remote`; tests use in-memory
//! doubles.

use serde::Serialize;
use wpgu_fs::NormalizedPath;
use wpgu_git::RemoteLocation;

use crate::Result;
use crate::extension::{ExtensionKind, RemoteMetadata};

/// Source of remote extension metadata.
pub trait Registry {
    /// Latest release of `slug`, or `None` when the registry has no record.
    fn fetch(&self, kind: ExtensionKind, slug: &str) -> Result<Option<RemoteMetadata>>;
}

/// Fetches update artifacts.
pub trait ArtifactSource {
    /// Download `url` into the file `destination`.
    fn download(&self, url: &str, destination: &NormalizedPath) -> Result<()>;
}

/// A pull request to open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequest {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
}

/// Opens pull requests against the repository behind `origin`.
pub trait PullRequests {
    /// Returns the web URL of the new pull request when the host reports one.
    fn create(&self, request: &PullRequest) -> Result<Option<String>>;
}

/// One usage record, sent before an extension is updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageEvent {
    pub provider: String,
    pub repository: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub slug: String,
}

impl UsageEvent {
    /// Build an event; without `stats` the slug and repository are withheld.
    pub fn new(
        kind: ExtensionKind,
        slug: &str,
        location: Option<&RemoteLocation>,
        stats: bool,
    ) -> Self {
        match location {
            Some(location) if stats => Self {
                provider: location.host.clone(),
                repository: location.repository.clone(),
                kind: kind.as_str().to_string(),
                slug: slug.to_string(),
            },
            _ => Self {
                provider: "*".to_string(),
                repository: "*/*".to_string(),
                kind: kind.as_str().to_string(),
                slug: if stats { slug.to_string() } else { String::new() },
            },
        }
    }
}

/// Receives usage records.
pub trait UsageReporter {
    fn report(&self, event: &UsageEvent) -> Result<()>;
}
