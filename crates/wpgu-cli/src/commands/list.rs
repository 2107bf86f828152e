//! List command: update status per extension

use std::path::Path;

use colored::Colorize;
use wpgu_core::{ExtensionKind, Registry, survey};
use wpgu_fs::NormalizedPath;
use wpgu_meta::{Environment, Settings};
use wpgu_remote::WordPressOrg;

use crate::error::Result;

/// Run the list command against the WordPress.org registry
pub fn run_list(root: &Path, plugins: bool, themes: bool) -> Result<()> {
    let settings = Settings::load(NormalizedPath::new(root), Environment::from_process())?;
    let registry = WordPressOrg::new()?;
    list_with(&settings, &registry, &selected_kinds(plugins, themes))
}

/// Kinds to list; selecting neither lists both.
pub fn selected_kinds(plugins: bool, themes: bool) -> Vec<ExtensionKind> {
    if !plugins && !themes {
        return ExtensionKind::ALL.to_vec();
    }
    ExtensionKind::ALL
        .into_iter()
        .filter(|kind| match kind {
            ExtensionKind::Plugin => plugins,
            ExtensionKind::Theme => themes,
        })
        .collect()
}

pub fn list_with(settings: &Settings, registry: &dyn Registry, kinds: &[ExtensionKind]) -> Result<()> {
    println!("{} List update statuses", "=>".blue().bold());

    for &kind in kinds {
        let candidates = survey(settings, registry, kind)?;
        if candidates.is_empty() {
            println!("{} No {} found", "SKIP".yellow().bold(), kind.plural());
            continue;
        }
        for candidate in candidates {
            println!("{}", status_line(&candidate.descriptor.slug, &candidate.status.to_string()));
        }
    }

    Ok(())
}

/// One listing row: the slug padded to 60 columns, then `[status]`.
pub fn status_line(slug: &str, status: &str) -> String {
    format!("{slug:<60}[{status}]")
}
