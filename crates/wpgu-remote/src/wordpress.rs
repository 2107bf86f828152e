//! WordPress.org plugin and theme directory client
//!
//! One `info/1.2` request per extension. The directory answers unknown
//! slugs in several ways (404, `false`, an object with an `error` key), and
//! all of them mean the extension is not hosted there.

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use wpgu_core::{ArtifactSource, ExtensionKind, Registry, RemoteMetadata};
use wpgu_fs::{NormalizedPath, io};

use crate::{Error, Result, client};

pub const DEFAULT_API_URL: &str = "https://api.wordpress.org";

#[derive(Debug, Default, Deserialize)]
struct InfoResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    version: String,
    #[serde(default)]
    download_link: String,
    #[serde(default)]
    last_updated: String,
    #[serde(default)]
    homepage: String,
    #[serde(default)]
    sections: Sections,
}

#[derive(Debug, Default, Deserialize)]
struct Sections {
    #[serde(default)]
    changelog: String,
    #[serde(default)]
    description: String,
}

/// Accept versions published as JSON numbers (`"version": 2`).
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Turn an `info/1.2` response body into metadata.
///
/// Returns `Ok(None)` when the body says the extension is unknown.
pub fn parse_info(kind: ExtensionKind, body: &str) -> Result<Option<RemoteMetadata>> {
    let value: Value = serde_json::from_str(body).map_err(|e| Error::InvalidResponse {
        message: e.to_string(),
    })?;

    let Some(object) = value.as_object() else {
        return Ok(None);
    };
    if object.contains_key("error") {
        return Ok(None);
    }

    let info: InfoResponse =
        serde_json::from_value(value).map_err(|e| Error::InvalidResponse {
            message: e.to_string(),
        })?;
    let notes = match kind {
        ExtensionKind::Plugin => info.sections.changelog,
        ExtensionKind::Theme => info.sections.description,
    };

    Ok(Some(RemoteMetadata {
        version: info.version.trim().to_string(),
        download_url: info.download_link,
        last_updated: info.last_updated,
        homepage: info.homepage,
        notes,
    }))
}

/// Client for `api.wordpress.org`, also used to fetch the release zips.
pub struct WordPressOrg {
    client: Client,
    api_url: String,
}

impl WordPressOrg {
    pub fn new() -> Result<Self> {
        Self::with_api_url(DEFAULT_API_URL)
    }

    /// Point the client at another directory mirror.
    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: client::build()?,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The information endpoint for `slug`.
    pub fn info_url(&self, kind: ExtensionKind, slug: &str) -> Result<Url> {
        let (path, action) = match kind {
            ExtensionKind::Plugin => ("plugins/info/1.2/", "plugin_information"),
            ExtensionKind::Theme => ("themes/info/1.2/", "theme_information"),
        };
        let mut params = vec![("action", action), ("request[slug]", slug)];
        if kind == ExtensionKind::Theme {
            params.push(("request[fields][sections]", "1"));
        }

        let base = format!("{}/{path}", self.api_url);
        Url::parse_with_params(&base, &params).map_err(|e| Error::InvalidUrl {
            url: base,
            message: e.to_string(),
        })
    }

    fn fetch_info(&self, kind: ExtensionKind, slug: &str) -> Result<Option<RemoteMetadata>> {
        let url = self.info_url(kind, slug)?;
        tracing::debug!(kind = %kind, slug = %slug, url = %url, "Querying registry");

        let response = self.client.get(url).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::status(response));
        }

        parse_info(kind, &response.text()?)
    }

    fn fetch_archive(&self, url: &str, destination: &NormalizedPath) -> Result<()> {
        tracing::debug!(url = %url, destination = %destination, "Downloading archive");

        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(Error::status(response));
        }
        let bytes = response.bytes()?;
        io::write_atomic(destination, &bytes)?;

        tracing::debug!(bytes = bytes.len(), "Archive written");
        Ok(())
    }
}

impl Registry for WordPressOrg {
    fn fetch(&self, kind: ExtensionKind, slug: &str) -> wpgu_core::Result<Option<RemoteMetadata>> {
        self.fetch_info(kind, slug)
            .map_err(|e| wpgu_core::Error::Registry {
                kind: kind.to_string(),
                slug: slug.to_string(),
                message: e.to_string(),
            })
    }
}

impl ArtifactSource for WordPressOrg {
    fn download(&self, url: &str, destination: &NormalizedPath) -> wpgu_core::Result<()> {
        self.fetch_archive(url, destination)
            .map_err(|e| wpgu_core::Error::Download {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}
