//! SHA-256 digests of path strings
//!
//! Used to derive flat, collision-resistant backup names when a mirrored
//! backup path would be too long for the platform.

use std::path::Path;

use sha2::{Digest, Sha256};

/// Compute the lowercase hex SHA-256 digest of a path.
///
/// The digest depends only on the path, never on file contents. On Unix the
/// raw path bytes are hashed, so every distinct path gets a distinct name;
/// elsewhere both separators hash the same.
pub fn compute_path_digest(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path_bytes(path));
    format!("{:x}", hasher.finalize())
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().replace('\\', "/").into_bytes()
}
