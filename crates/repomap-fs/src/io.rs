//! Atomic I/O operations with file locking

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use fs2::FileExt;

use crate::{Error, Result};

/// Write content atomically to a file with locking.
///
/// Uses a write-to-temp-then-rename strategy so readers only ever see the old
/// or the new content. When the target already exists its permission bits are
/// carried over to the replacement. A symlink is written through: its target
/// receives the new content and the link itself stays in place.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let target = resolve_link(path)?;

    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let existing_permissions = fs::metadata(&target).ok().map(|m| m.permissions());

    // Temp file lives in the same directory so the rename stays on one filesystem
    let temp_path = temp_path_for(&target);

    let result = write_temp(&temp_path, &target, content).and_then(|()| {
        if let Some(permissions) = existing_permissions {
            fs::set_permissions(&temp_path, permissions).map_err(|e| Error::io(&temp_path, e))?;
        }
        fs::rename(&temp_path, &target).map_err(|e| Error::io(&target, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Scratch file used by [`write_atomic`] while replacing `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

fn resolve_link(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            dunce::canonicalize(path).map_err(|e| Error::io(path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn write_temp(temp_path: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    FileExt::lock_exclusive(&temp_file).map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    Ok(())
}

/// Read a file as UTF-8 text.
///
/// Content that does not decode is reported as [`Error::Binary`]; every
/// other failure is an [`Error::Io`].
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| Error::Binary {
        path: path.to_path_buf(),
    })
}

/// Whether a file fails to decode as text.
///
/// Unreadable files are not considered binary; their read error surfaces
/// later, when the file is actually processed.
pub fn is_binary(path: &Path) -> bool {
    matches!(read_text(path), Err(Error::Binary { .. }))
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Copy `source` to `destination`, creating parent directories and keeping
/// the source's access and modification times.
///
/// Returns the number of bytes copied.
pub fn copy_preserving_times(source: &Path, destination: &Path) -> Result<u64> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let bytes = fs::copy(source, destination).map_err(|e| Error::io(destination, e))?;

    let metadata = fs::metadata(source).map_err(|e| Error::io(source, e))?;
    let accessed = FileTime::from_last_access_time(&metadata);
    let modified = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(destination, accessed, modified)
        .map_err(|e| Error::io(destination, e))?;

    Ok(bytes)
}

/// Resolve a directory to its canonical absolute form.
///
/// Uses `dunce` so Windows paths stay free of the `\\?\` prefix.
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| Error::io(path, e))
}
