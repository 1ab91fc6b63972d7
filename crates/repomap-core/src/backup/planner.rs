//! Backup destination planning

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, TimeZone};
use repomap_fs::checksum::compute_path_digest;
use repomap_fs::RepoPath;

use crate::filter::PathFilter;

/// Longest backup path, in characters, kept in the mirrored layout.
pub const DEFAULT_MAX_PATH_LEN: usize = 260;

/// Where one file's backup copy goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupDestination {
    /// The original file
    pub source: PathBuf,
    /// The backup copy
    pub destination: PathBuf,
    /// Whether the digest-named fallback was used
    pub fallback: bool,
}

/// Maps project files to backup destinations under one backup root.
#[derive(Debug, Clone)]
pub struct BackupPlanner {
    backup_root: PathBuf,
    project_root: PathBuf,
    max_path_len: usize,
}

impl BackupPlanner {
    pub fn new(backup_root: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            backup_root: backup_root.into(),
            project_root: project_root.into(),
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }

    /// Planner rooted at `<project_root>/.tree_map_backup/<YYYYmmdd_HHMMSS>`.
    pub fn timestamped<Tz>(project_root: impl Into<PathBuf>, now: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let project_root = project_root.into();
        let backup_root = project_root
            .join(RepoPath::BackupDir)
            .join(now.format("%Y%m%d_%H%M%S").to_string());
        Self::new(backup_root, project_root)
    }

    pub fn with_max_path_len(mut self, max_path_len: usize) -> Self {
        self.max_path_len = max_path_len;
        self
    }

    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn max_path_len(&self) -> usize {
        self.max_path_len
    }

    /// Plan the backup of `file`, or `None` when it must not be backed up.
    ///
    /// Files inside any backup directory, files the filter excludes and
    /// files outside the project root are refused.
    pub fn plan(&self, file: &Path, filter: &PathFilter) -> Option<BackupDestination> {
        if self.is_inside_backup(file) {
            tracing::info!(path = %file.display(), "Skipping backup for file already in backup directory");
            return None;
        }
        if filter.should_exclude(file, &self.project_root) {
            tracing::info!(path = %file.display(), "Skipping backup for excluded file");
            return None;
        }
        let Ok(relative) = file.strip_prefix(&self.project_root) else {
            tracing::warn!(path = %file.display(), "Skipping backup for file outside the project");
            return None;
        };

        let mirrored = self.backup_root.join(relative);
        if mirrored.to_string_lossy().chars().count() <= self.max_path_len {
            tracing::debug!(path = %file.display(), destination = %mirrored.display(), "Planned backup");
            return Some(BackupDestination {
                source: file.to_path_buf(),
                destination: mirrored,
                fallback: false,
            });
        }

        tracing::warn!(path = %file.display(), "Backup path too long, using digest-named fallback");
        let digest = compute_path_digest(file);
        let name = match file.extension() {
            Some(ext) => format!("{digest}.{}", ext.to_string_lossy()),
            None => digest,
        };
        Some(BackupDestination {
            source: file.to_path_buf(),
            destination: self.backup_root.join(name),
            fallback: true,
        })
    }

    fn is_inside_backup(&self, file: &Path) -> bool {
        file.starts_with(&self.backup_root)
            || file
                .components()
                .any(|c| matches!(c, Component::Normal(name) if name == RepoPath::BackupDir.as_str()))
    }
}
