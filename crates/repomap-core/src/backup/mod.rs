//! Pre-modification backups of updated files
//!
//! Backups for one run live under `.tree_map_backup/<YYYYmmdd_HHMMSS>/` and
//! mirror the project's relative layout. When a mirrored path would exceed
//! the configured length limit, the copy is stored flat under the backup root
//! with a name derived from the SHA-256 digest of the original path.

mod manager;
mod planner;

pub use manager::BackupManager;
pub use planner::{BackupDestination, BackupPlanner, DEFAULT_MAX_PATH_LEN};
