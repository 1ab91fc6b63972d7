//! Answers to the confirmation points of a run.
//!
//! A run pauses three times: before rewriting files, before making backups
//! and before committing. [`Decide`] lets the caller answer each question
//! lazily, with the context available at that point. [`Decisions`] is the
//! pre-resolved form used for non-interactive runs and tests.

use std::convert::Infallible;
use std::path::PathBuf;

/// Source of answers for the three confirmation points.
pub trait Decide {
    type Error;

    /// Whether to rewrite the listed candidate files.
    fn proceed(&mut self, candidates: &[PathBuf]) -> Result<bool, Self::Error>;

    /// Whether to back up files before rewriting them.
    fn backup(&mut self) -> Result<bool, Self::Error>;

    /// Whether to commit the rewritten files.
    fn commit(&mut self, modified: &[PathBuf]) -> Result<bool, Self::Error>;
}

/// Fixed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decisions {
    pub proceed: bool,
    pub backup: bool,
    pub commit: bool,
}

impl Decisions {
    /// Yes to everything.
    pub fn accept_all() -> Self {
        Self {
            proceed: true,
            backup: true,
            commit: true,
        }
    }

    /// No to everything.
    pub fn decline_all() -> Self {
        Self {
            proceed: false,
            backup: false,
            commit: false,
        }
    }
}

impl Decide for Decisions {
    type Error = Infallible;

    fn proceed(&mut self, _candidates: &[PathBuf]) -> Result<bool, Infallible> {
        Ok(self.proceed)
    }

    fn backup(&mut self) -> Result<bool, Infallible> {
        Ok(self.backup)
    }

    fn commit(&mut self, _modified: &[PathBuf]) -> Result<bool, Infallible> {
        Ok(self.commit)
    }
}
