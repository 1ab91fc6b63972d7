//! Copying files into the backup root

use std::fs;
use std::path::Path;

use repomap_fs::io;

use super::planner::{BackupDestination, BackupPlanner};
use crate::filter::PathFilter;
use crate::metrics::RunMetrics;
use crate::{Error, Result};

/// Executes planned backups for one run.
#[derive(Debug, Clone)]
pub struct BackupManager {
    planner: BackupPlanner,
}

impl BackupManager {
    pub fn new(planner: BackupPlanner) -> Self {
        Self { planner }
    }

    pub fn planner(&self) -> &BackupPlanner {
        &self.planner
    }

    pub fn backup_root(&self) -> &Path {
        self.planner.backup_root()
    }

    /// Create the backup root directory.
    pub fn prepare(&self) -> Result<()> {
        let root = self.planner.backup_root();
        fs::create_dir_all(root).map_err(|e| repomap_fs::Error::io(root, e))?;
        tracing::info!(path = %root.display(), "Created backup directory");
        Ok(())
    }

    /// Back up `file` if the planner allows it.
    ///
    /// Returns `Ok(None)` when the planner refuses the file. On success the
    /// copied byte count is added to `metrics`.
    ///
    /// # Errors
    /// Returns `Error::BackupFailed` when the copy fails.
    pub fn backup(
        &self,
        file: &Path,
        filter: &PathFilter,
        metrics: &mut RunMetrics,
    ) -> Result<Option<BackupDestination>> {
        let Some(plan) = self.planner.plan(file, filter) else {
            return Ok(None);
        };

        let bytes = io::copy_preserving_times(&plan.source, &plan.destination).map_err(|e| {
            Error::BackupFailed {
                path: file.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        metrics.record_backup(bytes);

        tracing::info!(path = %file.display(), destination = %plan.destination.display(), bytes, "Backup created");
        Ok(Some(plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ExclusionRuleSet;
    use repomap_test_utils::project::TestProject;

    #[test]
    fn backup_copies_and_counts_bytes() {
        let project = TestProject::new();
        let file = project.write("src/main.py", "print('hello')\n");
        let manager = BackupManager::new(BackupPlanner::new(
            project.path(".tree_map_backup/run"),
            project.root(),
        ));
        let filter = PathFilter::new(ExclusionRuleSet::builtin().unwrap());
        let mut metrics = RunMetrics::new();

        manager.prepare().unwrap();
        let plan = manager.backup(&file, &filter, &mut metrics).unwrap().unwrap();

        assert_eq!(plan.destination, project.path(".tree_map_backup/run/src/main.py"));
        assert_eq!(project.read(".tree_map_backup/run/src/main.py"), "print('hello')\n");
        assert_eq!(metrics.backup_bytes(), 15);
    }

    #[test]
    fn missing_source_is_backup_failure() {
        let project = TestProject::new();
        let manager = BackupManager::new(BackupPlanner::new(
            project.path(".tree_map_backup/run"),
            project.root(),
        ));
        let filter = PathFilter::new(ExclusionRuleSet::empty());
        let mut metrics = RunMetrics::new();

        let err = manager
            .backup(&project.path("gone.py"), &filter, &mut metrics)
            .unwrap_err();
        assert!(matches!(err, Error::BackupFailed { .. }));
        assert_eq!(metrics.backup_bytes(), 0);
    }
}
