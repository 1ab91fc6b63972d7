//! Exclusion rules and the path filter built on them.
//!
//! Directory globs are tested against every segment of a path relative to
//! the project root, so an excluded ancestor hides its whole subtree. File
//! globs are tested only against the base name of regular files. Both sides
//! are lowercased before matching.

use std::path::{Component, Path};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::{Error, Result};

/// Directory-name globs excluded by default.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    "CVS",
    // Virtual environments
    "venv",
    "env",
    ".env",
    "virtualenv",
    ".venv",
    ".conda",
    "anaconda",
    "miniconda",
    // Build output
    "build",
    "dist",
    "target",
    "out",
    // Python caches
    "__pycache__",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    ".tox",
    ".eggs",
    ".cache",
    // JavaScript
    "node_modules",
    "bower_components",
    "jspm_packages",
    // Dependencies
    "vendor",
    "packages",
    // Editors
    ".idea",
    ".vscode",
    ".vs",
    ".eclipse",
    ".settings",
    ".sublime-project",
    ".sublime-workspace",
    // Documentation
    "docs",
    "_build",
    "site",
    "sphinx-docs",
    // Coverage and logs
    "htmlcov",
    ".coverage",
    ".coveragerc",
    "logs",
    "__logs__",
    // Temporary
    "tmp",
    "temp",
    // System
    "$RECYCLE.BIN",
    "System Volume Information",
    // Other tool caches
    ".sass-cache",
    ".gradle",
    ".m2",
    // Static content
    "media",
    "public",
    "static",
    "assets",
    // Tool artifacts
    "*aider*",
    ".tree_map_backup",
];

/// File-name globs excluded by default.
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    // Version control and project configuration
    ".gitignore",
    ".gitattributes",
    ".hgignore",
    ".svnignore",
    "requirements.txt",
    "*LICENSE*",
    "setup.py",
    "setup.cfg",
    "pyproject.toml",
    "Pipfile",
    "Pipfile.lock",
    "*README*",
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "composer.json",
    "composer.lock",
    ".editorconfig",
    ".eslintrc",
    ".prettierrc",
    ".stylelintrc",
    // Compiled objects
    "*.pyc",
    "*.pyo",
    "*.pyd",
    "*.so",
    "*.dll",
    "*.exe",
    "*.obj",
    "*.o",
    "*.a",
    "*.lib",
    "*.egg",
    "*.whl",
    // Logs and databases
    "*.log",
    "*.sql",
    "*.sqlite",
    "*.db",
    // System and temp files
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    "*~",
    "*.swp",
    "*.swo",
    "*.tmp",
    "temp_*",
    "__init__.py",
    "MANIFEST.in",
    "node_modules",
    // Editor project files
    "*.iml",
    "*.ipr",
    "*.iws",
    // Backups and caches
    "*.bak",
    "*.cache",
    "*.pid",
    // Images
    "*.png",
    "*.jpg",
    "*.jpeg",
    "*.gif",
    "*.bmp",
    "*.svg",
    "*.tiff",
    "*.ico",
    // Video
    "*.mp4",
    "*.mkv",
    "*.avi",
    "*.mov",
    "*.wmv",
    "*.flv",
    "*.webm",
    "*.m4v",
    // Audio
    "*.mp3",
    "*.wav",
    "*.flac",
    "*.aac",
    "*.ogg",
    "*.wma",
    "*.m4a",
    // Documents
    "*.pdf",
    "*.doc",
    "*.docx",
    "*.ppt",
    "*.pptx",
    "*.xls",
    "*.xlsx",
    "*.odt",
    "*.ods",
    // Archives
    "*.zip",
    "*.tar",
    "*.gz",
    "*.rar",
    "*.7z",
    "*.bz2",
    "*.xz",
    // Other media
    "*.psd",
    "*.ai",
    "*.eps",
    "*.indd",
    "*.fla",
    "*.swf",
    // Tool artifacts
    "*aider*",
    "*.tree_map.*",
    "repo_map.md",
    "repo_map_gen*",
];

/// Two compiled sets of case-insensitive globs: one for directory-name
/// segments, one for file base names.
#[derive(Debug, Clone)]
pub struct ExclusionRuleSet {
    dir_patterns: Vec<String>,
    file_patterns: Vec<String>,
    dirs: GlobSet,
    files: GlobSet,
}

impl ExclusionRuleSet {
    /// Compile a rule set from explicit pattern lists.
    ///
    /// # Errors
    /// Returns `Error::InvalidPattern` naming the first glob that fails to
    /// compile.
    pub fn new<D, F>(dir_patterns: D, file_patterns: F) -> Result<Self>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        let dir_patterns: Vec<String> = dir_patterns.into_iter().map(Into::into).collect();
        let file_patterns: Vec<String> = file_patterns.into_iter().map(Into::into).collect();
        let dirs = compile(&dir_patterns)?;
        let files = compile(&file_patterns)?;
        Ok(Self {
            dir_patterns,
            file_patterns,
            dirs,
            files,
        })
    }

    /// The built-in rule set.
    pub fn builtin() -> Result<Self> {
        Self::new(
            DEFAULT_EXCLUDED_DIRS.iter().copied(),
            DEFAULT_EXCLUDED_FILES.iter().copied(),
        )
    }

    /// A rule set that excludes nothing.
    pub fn empty() -> Self {
        Self {
            dir_patterns: Vec::new(),
            file_patterns: Vec::new(),
            dirs: GlobSet::empty(),
            files: GlobSet::empty(),
        }
    }

    /// Extend this rule set with additional patterns, recompiling both sets.
    pub fn with_extra<D, F>(self, dir_patterns: D, file_patterns: F) -> Result<Self>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        let mut dirs = self.dir_patterns;
        let mut files = self.file_patterns;
        for pattern in dir_patterns.into_iter().map(Into::into) {
            if !dirs.contains(&pattern) {
                dirs.push(pattern);
            }
        }
        for pattern in file_patterns.into_iter().map(Into::into) {
            if !files.contains(&pattern) {
                files.push(pattern);
            }
        }
        Self::new(dirs, files)
    }

    pub fn dir_patterns(&self) -> &[String] {
        &self.dir_patterns
    }

    pub fn file_patterns(&self) -> &[String] {
        &self.file_patterns
    }

    /// Whether a single path segment matches a directory glob.
    pub fn matches_dir(&self, segment: &str) -> bool {
        self.dirs.is_match(segment.to_lowercase())
    }

    /// Whether a file base name matches a file glob.
    pub fn matches_file(&self, name: &str) -> bool {
        self.files.is_match(name.to_lowercase())
    }
}

fn compile(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(&pattern.to_lowercase())
            .case_insensitive(true)
            .backslash_escape(false)
            .build()
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| Error::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Decides whether a path takes part in rendering, updating or backup.
#[derive(Debug, Clone)]
pub struct PathFilter {
    rules: ExclusionRuleSet,
}

impl PathFilter {
    pub fn new(rules: ExclusionRuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ExclusionRuleSet {
        &self.rules
    }

    /// Whether `path` is excluded relative to `root`.
    ///
    /// Queries the filesystem to tell files from directories. Use
    /// [`PathFilter::should_exclude_as`] when the kind is already known.
    pub fn should_exclude(&self, path: &Path, root: &Path) -> bool {
        self.should_exclude_as(path, root, path.is_file())
    }

    /// Whether `path` is excluded, given whether it is a regular file.
    ///
    /// A path outside `root` is matched segment by segment as given.
    pub fn should_exclude_as(&self, path: &Path, root: &Path, is_file: bool) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);

        let excluded_segment = relative.components().find_map(|component| match component {
            Component::Normal(segment) => {
                let segment = segment.to_string_lossy();
                self.rules.matches_dir(&segment).then(|| segment.into_owned())
            }
            _ => None,
        });
        if let Some(segment) = excluded_segment {
            tracing::trace!(path = %path.display(), segment = %segment, "Excluded by directory rule");
            return true;
        }

        if is_file
            && let Some(name) = path.file_name()
            && self.rules.matches_file(&name.to_string_lossy())
        {
            tracing::trace!(path = %path.display(), "Excluded by file rule");
            return true;
        }

        false
    }
}
