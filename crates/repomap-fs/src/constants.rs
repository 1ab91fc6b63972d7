//! Well-known names inside a mapped project.

use std::path::Path;

/// Project configuration file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".repomap.toml",
    ".repomap.json",
    ".repomap.yaml",
    ".repomap.yml",
];

/// Standard filesystem markers and default names used by the map generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoPath {
    /// The `.git` directory (version control marker)
    GitDir,
    /// The `.tree_map_backup` directory (root of all timestamped backups)
    BackupDir,
    /// The default name of the rendered map artifact
    DefaultMapFile,
}

impl RepoPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitDir => ".git",
            Self::BackupDir => ".tree_map_backup",
            Self::DefaultMapFile => "repo_map.md",
        }
    }
}

impl AsRef<Path> for RepoPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
