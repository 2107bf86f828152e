//! I/O helpers that attach the offending path to every error

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read a file as text, replacing invalid UTF-8 sequences.
///
/// For third-party files whose encoding is not under our control.
pub fn read_text_lossy(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    let bytes = fs::read(&native_path).map_err(|e| Error::io(&native_path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Copy `from` over `to`, replacing any existing file.
pub fn copy_file(from: &NormalizedPath, to: &NormalizedPath) -> Result<()> {
    fs::copy(from.to_native(), to.to_native()).map_err(|e| Error::io(from.to_native(), e))?;
    Ok(())
}

/// Move `from` to `to`, replacing any existing file.
pub fn rename(from: &NormalizedPath, to: &NormalizedPath) -> Result<()> {
    fs::rename(from.to_native(), to.to_native()).map_err(|e| Error::io(from.to_native(), e))
}

/// Remove a single file.
pub fn remove_file(path: &NormalizedPath) -> Result<()> {
    fs::remove_file(path.to_native()).map_err(|e| Error::io(path.to_native(), e))
}

/// Remove a directory tree. A directory that is already gone is not an error.
pub fn remove_dir_all(path: &NormalizedPath) -> Result<()> {
    match fs::remove_dir_all(path.to_native()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path.to_native(), e)),
    }
}

/// Files under `root` matching the site-relative glob `pattern`, in
/// lexical order.
///
/// Entries that cannot be read while walking are skipped.
pub fn glob_files(root: &NormalizedPath, pattern: &str) -> Result<Vec<NormalizedPath>> {
    let full_pattern = root.join(pattern);
    let paths = glob::glob(full_pattern.as_str()).map_err(|e| Error::Glob {
        pattern: full_pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => files.push(NormalizedPath::new(path)),
            Ok(_) => {}
            Err(e) => tracing::debug!(error = %e, "Skipping unreadable glob entry"),
        }
    }
    Ok(files)
}
