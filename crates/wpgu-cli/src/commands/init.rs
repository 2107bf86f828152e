//! Init command: write the config file or the CI workflow

use std::path::Path;

use colored::Colorize;
use wpgu_fs::NormalizedPath;
use wpgu_meta::templates::{write_config_template, write_workflow_template};

use crate::error::Result;

/// Run the init command
pub fn run_init(root: &Path, actions: bool) -> Result<()> {
    let root = NormalizedPath::new(root);

    let written = if actions {
        println!("{} Creating workflow file", "=>".blue().bold());
        write_workflow_template(&root)?
    } else {
        println!("{} Creating config file", "=>".blue().bold());
        write_config_template(&root)?
    };

    println!("{} Created {}", "OK".green().bold(), written.as_str().cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_config_then_refuses_overwrite() {
        let temp = TempDir::new().unwrap();

        run_init(temp.path(), false).unwrap();
        let second = run_init(temp.path(), false);

        assert!(temp.path().join(".wpgitupdater.yml").is_file());
        assert!(second.is_err());
    }

    #[test]
    fn writes_workflow() {
        let temp = TempDir::new().unwrap();

        run_init(temp.path(), true).unwrap();

        assert!(temp.path().join(".github/workflows/wpgitupdater.yml").is_file());
        assert!(!temp.path().join(".wpgitupdater.yml").exists());
    }
}
