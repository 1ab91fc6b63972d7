//! Error types for repomap-git

use std::path::PathBuf;

/// Result type for repomap-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in repomap-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] repomap_fs::Error),

    #[error("Repository at {path} has no working directory")]
    BareRepository { path: PathBuf },

    #[error("Path {path} is outside the repository working directory")]
    OutsideRepository { path: PathBuf },
}
