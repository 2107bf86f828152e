//! Zip extraction that refuses to write outside its destination
//!
//! Every entry is validated before the first byte hits the disk, so a
//! hostile archive cannot leave half of its payload behind.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::{Error, NormalizedPath, Result};

struct PlannedEntry {
    index: usize,
    target: PathBuf,
    is_dir: bool,
    unix_mode: Option<u32>,
}

/// Extract `archive` into `dest`, returning the files that were written.
///
/// `dest` is created if it does not exist. Any entry whose path is absolute,
/// climbs out of `dest`, passes through a symlink that leaves `dest` or
/// lands on an existing symlink fails the whole extraction with
/// [`Error::PathTraversal`] before anything is written.
pub fn extract_zip(archive: &NormalizedPath, dest: &NormalizedPath) -> Result<Vec<PathBuf>> {
    let archive_path = archive.to_native();
    let file = File::open(&archive_path).map_err(|e| Error::io(&archive_path, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| archive_error(archive, e))?;

    fs::create_dir_all(dest.to_native()).map_err(|e| Error::io(dest.to_native(), e))?;
    let root = dunce::canonicalize(dest.to_native()).map_err(|e| Error::io(dest.to_native(), e))?;

    let mut plan = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        let entry = zip
            .by_index_raw(index)
            .map_err(|e| archive_error(archive, e))?;
        let relative = entry
            .enclosed_name()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| Error::PathTraversal {
                entry: entry.name().to_string(),
                root: root.clone(),
            })?;
        let target = root.join(&relative);
        if !target.starts_with(&root) || !resolves_inside(&root, &relative) {
            return Err(Error::PathTraversal {
                entry: entry.name().to_string(),
                root,
            });
        }
        plan.push(PlannedEntry {
            index,
            target,
            is_dir: entry.is_dir(),
            unix_mode: entry.unix_mode(),
        });
    }

    let mut written = Vec::new();
    for planned in plan {
        if planned.is_dir {
            fs::create_dir_all(&planned.target).map_err(|e| Error::io(&planned.target, e))?;
            continue;
        }

        if let Some(parent) = planned.target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let mut entry = zip
            .by_index(planned.index)
            .map_err(|e| archive_error(archive, e))?;
        let mut out = File::create(&planned.target).map_err(|e| Error::io(&planned.target, e))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| Error::io(&planned.target, e))?;

        #[cfg(unix)]
        if let Some(mode) = planned.unix_mode {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&planned.target, fs::Permissions::from_mode(mode & 0o777))
                .map_err(|e| Error::io(&planned.target, e))?;
        }
        #[cfg(not(unix))]
        let _ = planned.unix_mode;

        written.push(planned.target);
    }

    tracing::debug!(
        archive = %archive,
        dest = %dest,
        files = written.len(),
        "Extracted archive"
    );

    Ok(written)
}

/// Whether `relative` under `root` stays inside `root` once the symlinks
/// already on disk are followed.
///
/// The final component must not be a symlink at all.
fn resolves_inside(root: &Path, relative: &Path) -> bool {
    let depth = relative.components().count();
    let mut current = root.to_path_buf();

    for (index, component) in relative.components().enumerate() {
        current.push(component);
        let Ok(metadata) = fs::symlink_metadata(&current) else {
            // Nothing below a missing path can exist yet
            return true;
        };
        if !metadata.file_type().is_symlink() {
            continue;
        }
        if index + 1 == depth {
            return false;
        }
        match dunce::canonicalize(&current) {
            Ok(resolved) if resolved.starts_with(root) => {}
            _ => return false,
        }
    }

    true
}

fn archive_error(archive: &NormalizedPath, e: ZipError) -> Error {
    Error::Archive {
        path: archive.to_native(),
        message: e.to_string(),
    }
}
