//! [`TestSite`] builder for WordPress checkout scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A plugin main-file header in the layout WordPress itself writes.
pub fn plugin_header(name: &str, version: &str) -> String {
    format!(
        "<?php\n/**\n * Plugin Name: {name}\n * Description: Test fixture\n * Version: {version}\n * Author: Fixtures\n */\n"
    )
}

/// A theme `style.css` header.
pub fn theme_header(name: &str, version: &str) -> String {
    format!("/*\nTheme Name: {name}\nAuthor: Fixtures\nVersion: {version}\n*/\nbody {{ margin: 0; }}\n")
}

/// A temporary site checkout with `plugins/` and `themes/` roots.
///
/// # Example
///
/// ```rust,no_run
/// use wpgu_test_utils::site::TestSite;
///
/// let site = TestSite::new();
/// site.add_plugin("akismet", "Akismet", "5.0");
/// site.write_config("version: \"1.0\"\nplugins:\n  enabled: true\n  path: plugins\n");
/// site.assert_file_exists("plugins/akismet/akismet.php");
/// ```
pub struct TestSite {
    temp_dir: TempDir,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    /// Create an empty temporary site.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the site.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a site-relative location.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to a site-relative file, creating parents.
    pub fn write(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    /// Add `plugins/<slug>/<slug>.php` with a plugin header.
    pub fn add_plugin(&self, slug: &str, name: &str, version: &str) {
        self.write(
            &format!("plugins/{slug}/{slug}.php"),
            &plugin_header(name, version),
        );
    }

    /// Add `themes/<slug>/style.css` with a theme header.
    pub fn add_theme(&self, slug: &str, name: &str, version: &str) {
        self.write(&format!("themes/{slug}/style.css"), &theme_header(name, version));
    }

    /// Write `.wpgitupdater.yml` at the site root.
    pub fn write_config(&self, yaml: &str) {
        self.write(".wpgitupdater.yml", yaml);
    }

    /// Read a site-relative file.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let full_path = self.path(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `relative` exists.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `relative` contains `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            relative,
            content,
            file_content
        );
    }
}
