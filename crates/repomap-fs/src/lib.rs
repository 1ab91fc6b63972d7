//! Filesystem primitives for the repository map generator
//!
//! Provides atomic rewrites, text/binary reads, metadata-preserving copies
//! and path digests used by the update and backup steps.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;

pub use config::ConfigStore;
pub use constants::{CONFIG_FILE_NAMES, RepoPath};
pub use error::{Error, Result};
