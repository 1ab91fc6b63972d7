//! Error types for repomap-core

use std::path::PathBuf;

/// Result type for repomap-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in repomap-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An exclusion glob could not be compiled
    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Copying a file into the backup root failed
    #[error("Backup failed for {path}: {reason}")]
    BackupFailed { path: PathBuf, reason: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from repomap-fs
    #[error(transparent)]
    Fs(#[from] repomap_fs::Error),

    /// Block codec error from repomap-blocks
    #[error(transparent)]
    Blocks(#[from] repomap_blocks::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
