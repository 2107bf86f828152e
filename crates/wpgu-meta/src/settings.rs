//! Resolved run settings: the config file plus the process environment

use std::fmt;

use wpgu_fs::NormalizedPath;

use crate::config::{Config, ExtensionConfig};
use crate::{Error, Result};

/// Token used to push branches and open pull requests.
pub const GIT_TOKEN_VAR: &str = "WP_GIT_UPDATER_GIT_TOKEN";

/// Token enabling usage reporting.
pub const UPDATER_TOKEN_VAR: &str = "WP_GIT_UPDATER_TOKEN";

/// Override for the usage reporting endpoint.
pub const API_URL_VAR: &str = "WP_GIT_UPDATER_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.wpgitupdater.dev";

/// Values taken from the process environment.
#[derive(Clone, Default)]
pub struct Environment {
    pub git_token: Option<String>,
    pub updater_token: Option<String>,
    pub api_url: Option<String>,
}

impl Environment {
    /// Read the updater's variables. Empty values count as unset.
    pub fn from_process() -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            git_token: read(GIT_TOKEN_VAR),
            updater_token: read(UPDATER_TOKEN_VAR),
            api_url: read(API_URL_VAR),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("git_token", &self.git_token.as_ref().map(|_| "***"))
            .field("updater_token", &self.updater_token.as_ref().map(|_| "***"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Everything a run needs, built once and passed by reference.
pub struct Settings {
    /// Repository root (the git working directory)
    pub root: NormalizedPath,
    pub config: Config,
    /// Base URL of the usage reporting API
    pub api_url: String,
    git_token: Option<String>,
    updater_token: Option<String>,
}

impl Settings {
    pub fn new(root: NormalizedPath, config: Config, env: Environment) -> Self {
        Self {
            root,
            config,
            api_url: env
                .api_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            git_token: env.git_token,
            updater_token: env.updater_token,
        }
    }

    /// Load `.wpgitupdater.yml` from `root` and combine it with `env`.
    pub fn load(root: NormalizedPath, env: Environment) -> Result<Self> {
        let config = Config::load(&root)?;
        Ok(Self::new(root, config, env))
    }

    /// The git token, required for anything that pushes.
    pub fn git_token(&self) -> Result<&str> {
        self.git_token.as_deref().ok_or_else(|| Error::MissingToken {
            variable: GIT_TOKEN_VAR.to_string(),
        })
    }

    /// The usage reporting token, when reporting is enabled.
    pub fn updater_token(&self) -> Option<&str> {
        self.updater_token.as_deref()
    }

    /// Absolute directory of an extension section, e.g. `<root>/plugins`.
    pub fn extension_root(&self, section: &ExtensionConfig, default_path: &str) -> NormalizedPath {
        self.root.join(section.path_or(default_path))
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("api_url", &self.api_url)
            .field("git_token", &self.git_token.as_ref().map(|_| "***"))
            .field("updater_token", &self.updater_token.as_ref().map(|_| "***"))
            .finish()
    }
}
