//! Run configuration
//!
//! Settings are resolved from two layers, later overriding earlier:
//!
//! 1. **Project file** - optional `.repomap.toml` (or `.json`, `.yaml`,
//!    `.yml`) at the project root
//! 2. **Command-line flags** - [`RunOptions`] built by the caller
//!
//! The project file may add exclusion patterns, rename the map artifact and
//! change the backup path length limit:
//!
//! ```toml
//! output = "TREE.md"
//! max_backup_path_length = 200
//!
//! [exclude]
//! dirs = ["generated"]
//! files = ["*.lock"]
//! ```

use std::path::Path;

use repomap_fs::{CONFIG_FILE_NAMES, ConfigStore, RepoPath};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::backup::DEFAULT_MAX_PATH_LEN;
use crate::filter::ExclusionRuleSet;

/// Contents of the optional project configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Patterns added to the built-in exclusion rules
    pub exclude: ExcludeConfig,
    /// Name of the map artifact
    pub output: Option<String>,
    /// Backup path length limit before the digest fallback kicks in
    pub max_backup_path_length: Option<usize>,
}

/// Extra exclusion globs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExcludeConfig {
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

impl ProjectConfig {
    /// Load the first project file found under `root`, or defaults when
    /// there is none.
    ///
    /// Files are looked up in [`CONFIG_FILE_NAMES`] order.
    ///
    /// # Errors
    /// A present but malformed file is an error.
    pub fn load(root: &Path) -> Result<Self> {
        let store = ConfigStore::new();
        for name in CONFIG_FILE_NAMES {
            if let Some(config) = store.load_optional::<Self>(&root.join(name))? {
                tracing::debug!(file = *name, "Loaded project configuration");
                return Ok(config);
            }
        }
        Ok(Self::default())
    }
}

/// Flags supplied by the caller for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub update_files: bool,
    pub backup: bool,
    pub force: bool,
    pub verbose: bool,
    pub output: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Rewrite files in place with the map block
    pub update_files: bool,
    /// Offer backups before rewriting
    pub backup: bool,
    /// Rewrite files even when their backup failed
    pub force: bool,
    pub verbose: bool,
    /// Name of the map artifact written at the project root
    pub output: String,
    pub max_backup_path_len: usize,
    /// Effective exclusion rules
    pub rules: ExclusionRuleSet,
}

impl RunConfig {
    /// Merge caller flags over the project file and the built-in rules.
    ///
    /// The map artifact and the project files are always excluded from
    /// updates. The artifact name is matched literally, never as a glob.
    ///
    /// # Errors
    /// Fails when an extra exclusion pattern does not compile.
    pub fn resolve(options: &RunOptions, project: &ProjectConfig) -> Result<Self> {
        let output = options
            .output
            .clone()
            .or_else(|| project.output.clone())
            .unwrap_or_else(|| RepoPath::DefaultMapFile.to_string());

        let mut file_patterns = project.exclude.files.clone();
        file_patterns.push(globset::escape(&output));
        file_patterns.extend(CONFIG_FILE_NAMES.iter().map(|name| name.to_string()));
        let rules = ExclusionRuleSet::builtin()?.with_extra(project.exclude.dirs.clone(), file_patterns)?;

        Ok(Self {
            update_files: options.update_files,
            backup: options.backup,
            force: options.force,
            verbose: options.verbose,
            output,
            max_backup_path_len: project.max_backup_path_length.unwrap_or(DEFAULT_MAX_PATH_LEN),
            rules,
        })
    }

    /// Load the project file under `root` and resolve against it.
    pub fn load(root: &Path, options: &RunOptions) -> Result<Self> {
        let project = ProjectConfig::load(root)?;
        Self::resolve(options, &project)
    }
}
