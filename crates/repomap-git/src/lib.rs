//! Git support for the repository map generator
//!
//! Detects whether a project is a git repository and commits the files a run
//! rewrote. Failures are reported to the caller and never touch the files.

pub mod commits;
pub mod error;

pub use commits::{COMMIT_MESSAGE, CommitInfo, commit_files, is_repository};
pub use error::{Error, Result};
