//! The `.wpgitupdater.yml` schema
//!
//! ```yaml
//! version: "1.0"
//! branch: develop
//! plugins:
//!   enabled: true
//!   path: plugins
//!   include: [akismet]
//! themes:
//!   enabled: false
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use wpgu_fs::{ConfigStore, NormalizedPath};

use crate::{Error, Result};

/// Config file name, relative to the repository root.
pub const CONFIG_FILE: &str = ".wpgitupdater.yml";

/// Schema version written by `init`.
pub const CONFIG_VERSION: &str = "1.0";

/// Schema versions this build understands.
pub const SUPPORTED_CONFIG_VERSIONS: &[&str] = &["1.0"];

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration schema version
    #[serde(deserialize_with = "version_string")]
    pub version: String,
    /// Pull request base branch; the checked-out branch when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default)]
    pub plugins: ExtensionConfig,
    #[serde(default)]
    pub themes: ExtensionConfig,
}

/// Settings for one extension kind (the `plugins:` or `themes:` section).
///
/// Optional strings left empty in the file behave as if unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Directory holding one sub-directory per extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Discovery glob relative to `path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Commit message template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Pull request title template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ExtensionConfig {
    /// Whether `slug` may be updated.
    ///
    /// A non-empty include list alone decides; otherwise a non-empty
    /// exclude list removes its entries; otherwise everything is eligible.
    pub fn is_eligible(&self, slug: &str) -> bool {
        if !self.include.is_empty() {
            self.include.iter().any(|s| s == slug)
        } else if !self.exclude.is_empty() {
            !self.exclude.iter().any(|s| s == slug)
        } else {
            true
        }
    }

    pub fn path_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(&self.path).unwrap_or(default)
    }

    pub fn pattern_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(&self.pattern).unwrap_or(default)
    }

    pub fn commit_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(&self.commit).unwrap_or(default)
    }

    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(&self.title).unwrap_or(default)
    }
}

impl Config {
    /// Location of the config file for a repository root.
    pub fn path(root: &NormalizedPath) -> NormalizedPath {
        root.join(CONFIG_FILE)
    }

    /// Load and validate the config file of the repository at `root`.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = Self::path(root);
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_native(),
            });
        }

        let config: Self = ConfigStore::new().load(&path).map_err(|e| match e {
            wpgu_fs::Error::ConfigParse { path, message, .. } => {
                Error::InvalidConfig { path, message }
            }
            other => Error::Fs(other),
        })?;

        config.check_version()?;
        tracing::debug!(path = %path, version = %config.version, "Loaded configuration");
        Ok(config)
    }

    /// Fail unless the schema version is one this build supports.
    pub fn check_version(&self) -> Result<()> {
        if SUPPORTED_CONFIG_VERSIONS.contains(&self.version.as_str()) {
            return Ok(());
        }
        Err(Error::UnsupportedVersion {
            version: self.version.clone(),
            updater: env!("CARGO_PKG_VERSION").to_string(),
            supported: SUPPORTED_CONFIG_VERSIONS.join(", "),
        })
    }

    /// Configured pull request base, ignoring an empty value.
    pub fn base_branch(&self) -> Option<&str> {
        non_empty(&self.branch)
    }
}

/// Accept `version: 1.0` as well as `version: "1.0"`.
fn version_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_yaml::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
