//! Error types for repomap-fs

use std::path::PathBuf;

/// Result type for repomap-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in repomap-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be decoded as UTF-8 text.
    #[error("Binary or non-UTF-8 file: {path}")]
    Binary { path: PathBuf },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error signals undecodable (binary) content.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary { .. })
    }
}
