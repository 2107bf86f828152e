//! Files written by `init` and placeholder substitution for messages

use wpgu_fs::{NormalizedPath, io};

use crate::config::{CONFIG_FILE, CONFIG_VERSION};
use crate::{Error, Result};

/// GitHub Actions workflow path, relative to the repository root.
pub const WORKFLOW_FILE: &str = ".github/workflows/wpgitupdater.yml";

pub const INSTALLER_URL: &str = "https://install.wpgitupdater.dev/install.sh";

/// Starter `.wpgitupdater.yml`.
pub fn config_template() -> String {
    format!(
        "version: \"{CONFIG_VERSION}\"\nplugins:\n  enabled: true\n  path: plugins\nthemes:\n  enabled: false\n  path: themes\n"
    )
}

/// Nightly workflow that installs and runs the updater.
pub fn workflow_template() -> String {
    format!(
        r#"name: wpgitupdater

on:
  schedule:
  - cron: 0 0 * * *

jobs:
  update:
    runs-on: ubuntu-latest
    steps:
    - uses: actions/checkout@v4
    - run: curl {INSTALLER_URL} | bash -s -- -b $HOME/bin
    - run: $HOME/bin/wpgitupdater update
      env:
        WP_GIT_UPDATER_TOKEN: ${{{{ secrets.WP_GIT_UPDATER_TOKEN }}}}
        WP_GIT_UPDATER_GIT_TOKEN: ${{{{ secrets.GITHUB_TOKEN }}}}
"#
    )
}

fn write_new(path: NormalizedPath, content: &str) -> Result<NormalizedPath> {
    if path.exists() {
        return Err(Error::AlreadyExists {
            path: path.to_native(),
        });
    }
    io::write_text(&path, content)?;
    tracing::info!(path = %path, "Created file");
    Ok(path)
}

/// Write the starter config under `root`. Never overwrites.
pub fn write_config_template(root: &NormalizedPath) -> Result<NormalizedPath> {
    write_new(root.join(CONFIG_FILE), &config_template())
}

/// Write the workflow under `root`, creating `.github/workflows`. Never
/// overwrites.
pub fn write_workflow_template(root: &NormalizedPath) -> Result<NormalizedPath> {
    write_new(root.join(WORKFLOW_FILE), &workflow_template())
}

/// Substitute `(placeholder, value)` pairs into `template` in one pass.
///
/// Values are inserted literally and never rescanned. Where placeholders
/// overlap at a position, the longest wins.
pub fn render(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let matched = replacements
            .iter()
            .filter(|(placeholder, _)| !placeholder.is_empty() && rest.starts_with(placeholder))
            .max_by_key(|(placeholder, _)| placeholder.len());
        match matched {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &rest[placeholder.len()..];
            }
            None => {
                out.push(':');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_substitutes_every_occurrence() {
        let message = render(
            ":plugin :oldversion -> :newversion (:plugin)",
            &[(":plugin", "akismet"), (":oldversion", "5.0"), (":newversion", "5.3")],
        );
        assert_eq!(message, "akismet 5.0 -> 5.3 (akismet)");
    }

    #[test]
    fn render_does_not_rescan_substituted_values() {
        let message = render(
            ":slug :oldversion -> :newversion",
            &[(":slug", "odd-:newversion"), (":oldversion", ":slug"), (":newversion", "5.3")],
        );
        assert_eq!(message, "odd-:newversion :slug -> 5.3");
    }

    #[test]
    fn render_prefers_the_longest_placeholder() {
        assert_eq!(render(":pluginx :plugin", &[(":plugin", "a"), (":pluginx", "b")]), "b a");
    }

    #[test]
    fn render_keeps_stray_colons() {
        assert_eq!(render("Note: :plugin:", &[(":plugin", "akismet")]), "Note: akismet:");
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        assert_eq!(render("Update :theme", &[(":plugin", "x")]), "Update :theme");
    }

    #[test]
    fn config_template_parses_as_current_version() {
        let config: crate::Config = serde_yaml::from_str(&config_template()).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.plugins.enabled);
        config.check_version().unwrap();
    }

    #[test]
    fn workflow_template_expands_secrets() {
        let workflow = workflow_template();
        assert!(workflow.contains("${{ secrets.GITHUB_TOKEN }}"));
        assert!(workflow.contains(INSTALLER_URL));
    }
}
