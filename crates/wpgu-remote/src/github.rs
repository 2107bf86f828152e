//! GitHub pull request client

use std::fmt;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use wpgu_core::{PullRequest, PullRequests};
use wpgu_git::RemoteLocation;

use crate::{Error, Result, client};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct Created {
    html_url: Option<String>,
}

/// Opens pull requests on the GitHub repository behind `origin`.
pub struct GitHub {
    client: Client,
    api_url: String,
    repository: String,
    token: String,
}

impl GitHub {
    /// Client for the repository at `location`, authenticated with `token`.
    pub fn new(location: &RemoteLocation, token: impl Into<String>) -> Result<Self> {
        if !location.is_github() {
            return Err(Error::UnsupportedProvider {
                host: location.host.clone(),
            });
        }
        Ok(Self {
            client: client::build()?,
            api_url: DEFAULT_API_URL.to_string(),
            repository: location.repository.clone(),
            token: token.into(),
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The create-pull-request endpoint.
    pub fn pulls_url(&self) -> String {
        format!("{}/repos/{}/pulls", self.api_url, self.repository)
    }

    fn open(&self, request: &PullRequest) -> Result<Option<String>> {
        let url = self.pulls_url();
        tracing::debug!(url = %url, head = %request.head, base = %request.base, "Opening pull request");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .json(request)
            .send()?;
        if !response.status().is_success() {
            return Err(Error::status(response));
        }

        let text = response.text()?;
        // A 2xx without the usual body still means the PR exists
        match serde_json::from_str::<Created>(&text) {
            Ok(created) => Ok(created.html_url),
            Err(e) => {
                tracing::warn!(error = %e, "Pull request created but response was not understood");
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for GitHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHub")
            .field("api_url", &self.api_url)
            .field("repository", &self.repository)
            .field("token", &"***")
            .finish()
    }
}

impl PullRequests for GitHub {
    fn create(&self, request: &PullRequest) -> wpgu_core::Result<Option<String>> {
        self.open(request).map_err(|e| wpgu_core::Error::PullRequest {
            head: request.head.clone(),
            message: e.to_string(),
        })
    }
}
