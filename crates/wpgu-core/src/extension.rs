//! Plugins and themes as one extension model
//!
//! Everything that differs between the two kinds lives on [`ExtensionKind`];
//! the pipeline itself is written once against it.

use std::fmt;

use wpgu_fs::NormalizedPath;
use wpgu_meta::{Config, ExtensionConfig};

/// Default first segment of update branch names.
pub const DEFAULT_BRANCH_PREFIX: &str = "wpgitupdates";

/// The kind of extension being managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtensionKind {
    Plugin,
    Theme,
}

impl ExtensionKind {
    /// Processing order: plugins before themes.
    pub const ALL: [ExtensionKind; 2] = [ExtensionKind::Plugin, ExtensionKind::Theme];

    /// Singular name, also used in branch names and usage reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ExtensionKind::Plugin => "plugin",
            ExtensionKind::Theme => "theme",
        }
    }

    /// Plural name: the config section, default directory and registry
    /// API path.
    pub fn plural(self) -> &'static str {
        match self {
            ExtensionKind::Plugin => "plugins",
            ExtensionKind::Theme => "themes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExtensionKind::Plugin => "Plugin",
            ExtensionKind::Theme => "Theme",
        }
    }

    /// Header tag holding the display name.
    pub fn name_tag(self) -> &'static str {
        match self {
            ExtensionKind::Plugin => "Plugin Name",
            ExtensionKind::Theme => "Theme Name",
        }
    }

    /// Header tag holding the installed version.
    pub fn version_tag(self) -> &'static str {
        "Version"
    }

    /// Discovery glob relative to the extension directory.
    pub fn default_pattern(self) -> &'static str {
        match self {
            ExtensionKind::Plugin => "*/*.php",
            ExtensionKind::Theme => "*/style.css",
        }
    }

    /// Template placeholder naming the extension, besides `:slug`.
    pub fn placeholder(self) -> &'static str {
        match self {
            ExtensionKind::Plugin => ":plugin",
            ExtensionKind::Theme => ":theme",
        }
    }

    pub fn default_commit_template(self) -> &'static str {
        match self {
            ExtensionKind::Plugin => "chore(plugins): Update :plugin from :oldversion to :newversion",
            ExtensionKind::Theme => "chore(themes): Update :theme from :oldversion to :newversion",
        }
    }

    pub fn default_title_template(self) -> &'static str {
        match self {
            ExtensionKind::Plugin => "Update plugin :plugin from :oldversion to :newversion",
            ExtensionKind::Theme => "Update theme :theme from :oldversion to :newversion",
        }
    }

    /// Heading of the registry text quoted in pull request bodies.
    pub fn notes_heading(self) -> &'static str {
        match self {
            ExtensionKind::Plugin => "Changelog",
            ExtensionKind::Theme => "Description",
        }
    }

    /// Registry section carrying that text.
    pub fn notes_section(self) -> &'static str {
        match self {
            ExtensionKind::Plugin => "changelog",
            ExtensionKind::Theme => "description",
        }
    }

    /// The config section for this kind.
    pub fn config(self, config: &Config) -> &ExtensionConfig {
        match self {
            ExtensionKind::Plugin => &config.plugins,
            ExtensionKind::Theme => &config.themes,
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plugin or theme found in the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    pub kind: ExtensionKind,
    /// Directory name, the identity of the extension
    pub slug: String,
    /// Directory holding the header file
    pub path: NormalizedPath,
    pub name: String,
    pub version: String,
}

impl ExtensionDescriptor {
    /// Deterministic update branch: `<prefix>-<kind>-<slug>-<old>-<new>`.
    pub fn branch_name(&self, prefix: &str, new_version: &str) -> String {
        format!(
            "{prefix}-{}-{}-{}-{new_version}",
            self.kind, self.slug, self.version
        )
    }

    /// Placeholder substitutions for commit and title templates.
    pub fn replacements<'a>(&'a self, new_version: &'a str) -> [(&'static str, &'a str); 4] {
        [
            (":slug", self.slug.as_str()),
            (self.kind.placeholder(), self.slug.as_str()),
            (":oldversion", self.version.as_str()),
            (":newversion", new_version),
        ]
    }
}

/// What the registry knows about the latest release of an extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteMetadata {
    /// Latest version; empty when the registry has no usable record
    pub version: String,
    pub download_url: String,
    pub last_updated: String,
    pub homepage: String,
    /// Changelog for plugins, description for themes
    pub notes: String,
}
