//! Extension discovery from WordPress header comments
//!
//! Every file matching the discovery glob is a candidate header file; its
//! parent directory name is the slug. The first file per slug that carries
//! both header tags wins.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use wpgu_fs::{NormalizedPath, io};

use crate::Result;
use crate::extension::{ExtensionDescriptor, ExtensionKind};

static PLUGIN_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| header_regex(ExtensionKind::Plugin.name_tag()));

static THEME_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| header_regex(ExtensionKind::Theme.name_tag()));

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| header_regex("Version"));

fn header_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?m)^[ \t/*#@]*{}:(.*)$", regex::escape(tag)))
        .expect("Invalid header regex")
}

/// Why a candidate file was not turned into a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("{path}: no '{tag}' header")]
    MissingTag { path: PathBuf, tag: &'static str },

    #[error(transparent)]
    Read(#[from] wpgu_fs::Error),
}

/// Name and version declared in a header comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub version: String,
}

/// Value of the first `tag:` line in `content`, trimmed.
pub fn header_field(content: &str, tag: &str) -> Option<String> {
    let regex = match tag {
        "Plugin Name" => &*PLUGIN_NAME_REGEX,
        "Theme Name" => &*THEME_NAME_REGEX,
        "Version" => &*VERSION_REGEX,
        other => return header_regex_field(&header_regex(other), content),
    };
    header_regex_field(regex, content)
}

fn header_regex_field(regex: &Regex, content: &str) -> Option<String> {
    regex
        .captures(content)
        .map(|captures| captures[1].trim().to_string())
}

/// Parse the name and version header of `kind` from `content`.
pub fn parse_header(
    kind: ExtensionKind,
    path: &NormalizedPath,
    content: &str,
) -> std::result::Result<Header, HeaderError> {
    let missing = |tag| HeaderError::MissingTag {
        path: path.to_native(),
        tag,
    };
    let name = header_field(content, kind.name_tag()).ok_or_else(|| missing(kind.name_tag()))?;
    let version =
        header_field(content, kind.version_tag()).ok_or_else(|| missing(kind.version_tag()))?;
    Ok(Header { name, version })
}

/// Read and parse one candidate header file.
pub fn read_header(
    kind: ExtensionKind,
    path: &NormalizedPath,
) -> std::result::Result<Header, HeaderError> {
    let content = io::read_text_lossy(path)?;
    parse_header(kind, path, &content)
}

/// Find the extensions of `kind` under `root`.
///
/// `pattern` is a glob relative to `root`. Slugs rejected by `eligible` are
/// dropped before their files are read. Files without a usable header are
/// logged and skipped. The result is keyed and ordered by slug.
pub fn discover(
    kind: ExtensionKind,
    root: &NormalizedPath,
    pattern: &str,
    eligible: impl Fn(&str) -> bool,
) -> Result<BTreeMap<String, ExtensionDescriptor>> {
    let mut found = BTreeMap::new();

    for file in io::glob_files(root, pattern)? {
        let Some(dir) = file.parent() else {
            continue;
        };
        let Some(slug) = dir.file_name().map(str::to_string) else {
            continue;
        };

        if !eligible(&slug) {
            tracing::debug!(kind = %kind, slug = %slug, "Not eligible, skipping");
            continue;
        }
        if found.contains_key(&slug) {
            continue;
        }

        match read_header(kind, &file) {
            Ok(header) => {
                tracing::info!(kind = %kind, slug = %slug, version = %header.version, "Found extension");
                found.insert(
                    slug.clone(),
                    ExtensionDescriptor {
                        kind,
                        slug,
                        path: dir,
                        name: header.name,
                        version: header.version,
                    },
                );
            }
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "Skipping file without usable header");
            }
        }
    }

    Ok(found)
}
