//! In-memory zip builders standing in for registry downloads.

use std::io::{Cursor, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Build a zip archive from `(name, content)` pairs.
///
/// Names ending in `/` become directory entries. Names are written verbatim,
/// so hostile paths such as `../escape.php` can be produced on purpose.
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, content) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, options)
                .unwrap_or_else(|e| panic!("zip_bytes: failed to add directory {name}: {e}"));
        } else {
            writer
                .start_file(*name, options)
                .unwrap_or_else(|e| panic!("zip_bytes: failed to start {name}: {e}"));
            writer
                .write_all(content.as_bytes())
                .unwrap_or_else(|e| panic!("zip_bytes: failed to write {name}: {e}"));
        }
    }

    writer
        .finish()
        .unwrap_or_else(|e| panic!("zip_bytes: failed to finish archive: {e}"))
        .into_inner()
}

/// Write a zip archive built by [`zip_bytes`] to `path`.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    std::fs::write(path, zip_bytes(entries))
        .unwrap_or_else(|e| panic!("write_zip: failed to write {}: {e}", path.display()));
}

/// A registry-shaped plugin archive: `<slug>/<slug>.php` carrying a header
/// for `version`, plus a readme.
pub fn plugin_zip(slug: &str, name: &str, version: &str) -> Vec<u8> {
    let dir = format!("{slug}/");
    let main = format!("{slug}/{slug}.php");
    let header = crate::site::plugin_header(name, version);
    let readme = format!("{slug}/readme.txt");
    zip_bytes(&[
        (dir.as_str(), ""),
        (main.as_str(), header.as_str()),
        (readme.as_str(), "=== readme ==="),
    ])
}

/// A registry-shaped theme archive: `<slug>/style.css` carrying a header
/// for `version`.
pub fn theme_zip(slug: &str, name: &str, version: &str) -> Vec<u8> {
    let dir = format!("{slug}/");
    let style = format!("{slug}/style.css");
    let header = crate::site::theme_header(name, version);
    zip_bytes(&[(dir.as_str(), ""), (style.as_str(), header.as_str())])
}
