//! Shared test utilities for the repository map workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures at three realism levels
//! - [`project`]: [`project::TestProject`] builder for scratch project trees

pub mod git;
pub mod project;
