//! Core of the repository map generator
//!
//! This crate decides which paths take part in a run, renders the project
//! tree and drives the per-file map updates:
//!
//! - **Filtering**: case-insensitive directory and file globs ([`PathFilter`])
//! - **Rendering**: the deterministic text tree ([`TreeRenderer`])
//! - **Backups**: destination planning and copying ([`BackupPlanner`], [`BackupManager`])
//! - **Updates**: the per-file update sequence ([`UpdateOrchestrator`])
//! - **Reporting**: run counters and their summary ([`RunMetrics`])
//!
//! # Architecture
//!
//! ```text
//!                  repomap-cli
//!                   |       |
//!           repomap-core   repomap-git
//!             |       |       |
//!   repomap-blocks   repomap-fs
//! ```
//!
//! The core never prompts, never talks to version control and never prints.
//! Callers resolve a [`RunConfig`], answer the confirmation points through
//! [`Decide`], and receive the list of rewritten files.
//!
//! # Example
//!
//! ```no_run
//! use repomap_core::{PathFilter, RunConfig, RunMetrics, RunOptions, TreeRenderer, UpdateOrchestrator};
//! use std::path::Path;
//!
//! fn example(root: &Path) -> repomap_core::Result<()> {
//!     let config = RunConfig::load(root, &RunOptions::default())?;
//!     let filter = PathFilter::new(config.rules.clone());
//!     let tree = TreeRenderer::new(&filter).render(root)?;
//!
//!     let mut metrics = RunMetrics::new();
//!     let modified = UpdateOrchestrator::new(root, &tree, &filter).run(&mut metrics);
//!     println!("{} files updated", modified.len());
//!     Ok(())
//! }
//! ```

pub mod backup;
pub mod config;
pub mod decisions;
pub mod error;
pub mod filter;
pub mod map_file;
pub mod metrics;
pub mod tree;
pub mod update;

pub use backup::{BackupDestination, BackupManager, BackupPlanner, DEFAULT_MAX_PATH_LEN};
pub use config::{ExcludeConfig, ProjectConfig, RunConfig, RunOptions};
pub use decisions::{Decide, Decisions};
pub use error::{Error, Result};
pub use filter::{DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_FILES, ExclusionRuleSet, PathFilter};
pub use map_file::{render_map_file, write_map_file};
pub use metrics::{MetricsSummary, RunMetrics};
pub use tree::TreeRenderer;
pub use update::{FileOutcome, UpdateOrchestrator, UpdateState};
