//! Loading of YAML documents through serde

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, io};

/// Whether `path` carries a YAML extension (case-insensitive).
fn ensure_yaml(path: &NormalizedPath) -> Result<()> {
    let extension = path.extension().unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "yml" | "yaml" => Ok(()),
        _ => Err(Error::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}

/// Reads YAML documents such as `.wpgitupdater.yml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        ensure_yaml(path)?;
        let content = io::read_text(path)?;
        self.parse(path, &content)
    }

    /// Parse `content` as if it had been read from `path`.
    pub fn parse<T: DeserializeOwned>(&self, path: &NormalizedPath, content: &str) -> Result<T> {
        ensure_yaml(path)?;
        serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            message: e.to_string(),
        })
    }
}
