//! In-place map updates across a project
//!
//! Every non-excluded regular file goes through the same sequence:
//!
//! ```text
//! Pending -> BackedUp | BackupFailed -> Read -> Encoded -> Written | NoOpSkipped -> Done
//! ```
//!
//! Any state may end in `Errored`. Binary files never enter the sequence;
//! they are counted as skipped. Symlinked files are skipped as well, since
//! their target is either mapped under its own name or lies outside the
//! project. A failure in one file never stops the run.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use repomap_blocks::{CommentStyle, MapBlockCodec, style_for};
use repomap_fs::io;
use walkdir::WalkDir;

use crate::Error;
use crate::backup::{BackupDestination, BackupManager};
use crate::filter::PathFilter;
use crate::metrics::RunMetrics;

/// Position of a file in the update sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Pending,
    BackedUp,
    BackupFailed,
    Read,
    Encoded,
    Written,
    NoOpSkipped,
    Done,
    Errored,
}

/// How one file's update ended.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file was rewritten
    Written {
        backup: Option<BackupDestination>,
    },
    /// The file already carried the current map
    Unchanged,
    /// The file is not valid UTF-8 text
    Binary,
    /// The update stopped at `state`; the file keeps its previous content
    Failed { state: UpdateState, error: Error },
}

struct Walk {
    files: Vec<PathBuf>,
    excluded: usize,
    errors: usize,
}

/// Drives map updates over the files of one project.
///
/// `root` must be the same root the tree was rendered from, since exclusion
/// rules are evaluated relative to it.
pub struct UpdateOrchestrator<'a> {
    root: PathBuf,
    tree: &'a str,
    filter: &'a PathFilter,
    backups: Option<&'a BackupManager>,
    force: bool,
    codecs: HashMap<CommentStyle, MapBlockCodec>,
}

impl<'a> UpdateOrchestrator<'a> {
    pub fn new(root: impl Into<PathBuf>, tree: &'a str, filter: &'a PathFilter) -> Self {
        Self {
            root: root.into(),
            tree,
            filter,
            backups: None,
            force: false,
            codecs: HashMap::new(),
        }
    }

    /// Back up each file through `manager` before rewriting it.
    pub fn with_backups(mut self, manager: &'a BackupManager) -> Self {
        self.backups = Some(manager);
        self
    }

    /// Rewrite files even when their backup failed.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files an update run would touch: non-excluded, non-binary regular
    /// files, in walk order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        self.walk()
            .files
            .into_iter()
            .filter(|file| !io::is_binary(file))
            .collect()
    }

    /// Update every file under the root and return those rewritten.
    pub fn run(&mut self, metrics: &mut RunMetrics) -> Vec<PathBuf> {
        let walk = self.walk();
        for _ in 0..walk.excluded {
            metrics.record_skipped();
        }
        for _ in 0..walk.errors {
            metrics.record_error();
        }

        let mut modified = Vec::new();
        for file in walk.files {
            metrics.record_processed();
            match self.update_file(&file, metrics) {
                FileOutcome::Written { .. } => {
                    metrics.record_modified();
                    modified.push(file);
                }
                FileOutcome::Unchanged => {
                    tracing::info!(path = %file.display(), "No changes needed");
                    metrics.record_skipped();
                }
                FileOutcome::Binary => {
                    tracing::info!(path = %file.display(), "Skipping binary file");
                    metrics.record_skipped();
                }
                FileOutcome::Failed { state, error } => {
                    tracing::error!(path = %file.display(), ?state, %error, "Error processing file");
                    metrics.record_error();
                    metrics.record_skipped();
                }
            }
        }

        tracing::info!(modified = modified.len(), "Finished updating files");
        modified
    }

    /// Insert or refresh the map block in a single file.
    pub fn update_file(&mut self, file: &Path, metrics: &mut RunMetrics) -> FileOutcome {
        if io::is_binary(file) {
            return FileOutcome::Binary;
        }

        let mut state = UpdateState::Pending;
        let mut backup = None;
        if let Some(manager) = self.backups {
            match manager.backup(file, self.filter, metrics) {
                Ok(Some(destination)) => {
                    backup = Some(destination);
                    state = advance(file, state, UpdateState::BackedUp);
                }
                Ok(None) => {}
                Err(error) => {
                    state = advance(file, state, UpdateState::BackupFailed);
                    if !self.force {
                        advance(file, state, UpdateState::Errored);
                        return FileOutcome::Failed { state, error };
                    }
                    tracing::warn!(path = %file.display(), %error, "Backup failed, proceeding without backup");
                    metrics.record_error();
                }
            }
        }

        let content = match io::read_text(file) {
            Ok(content) => content,
            Err(e) if e.is_binary() => return FileOutcome::Binary,
            Err(e) => {
                advance(file, state, UpdateState::Errored);
                return FileOutcome::Failed {
                    state,
                    error: e.into(),
                };
            }
        };
        state = advance(file, state, UpdateState::Read);

        let extension = file
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        let filename = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tree = self.tree;
        let codec = match self.codec(style_for(&extension)) {
            Ok(codec) => codec,
            Err(error) => {
                advance(file, state, UpdateState::Errored);
                return FileOutcome::Failed { state, error };
            }
        };
        let applied = codec.apply(&content, tree, &filename);
        state = advance(file, state, UpdateState::Encoded);

        if !applied.changed {
            state = advance(file, state, UpdateState::NoOpSkipped);
            advance(file, state, UpdateState::Done);
            return FileOutcome::Unchanged;
        }

        if let Err(e) = io::write_text(file, &applied.content) {
            advance(file, state, UpdateState::Errored);
            return FileOutcome::Failed {
                state,
                error: e.into(),
            };
        }
        state = advance(file, state, UpdateState::Written);
        tracing::info!(path = %file.display(), "Updated repo map");
        if self.backups.is_some() && backup.is_none() {
            tracing::warn!(path = %file.display(), "File was updated without a backup");
        }
        advance(file, state, UpdateState::Done);

        FileOutcome::Written { backup }
    }

    fn codec(&mut self, style: CommentStyle) -> crate::Result<&MapBlockCodec> {
        match self.codecs.entry(style) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(MapBlockCodec::new(style)?)),
        }
    }

    fn walk(&self) -> Walk {
        let root = &self.root;
        let filter = self.filter;
        let excluded = std::cell::Cell::new(0);
        let mut errors = 0;
        let mut files = Vec::new();

        let entries = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let path = entry.path();
                let skip = filter.should_exclude_as(path, root, path.is_file());
                if skip {
                    tracing::info!(path = %path.display(), "Skipping excluded path");
                    excluded.set(excluded.get() + 1);
                }
                !skip
            });

        for entry in entries {
            match entry {
                Ok(entry) if entry.path_is_symlink() => {
                    if entry.path().is_file() {
                        tracing::info!(path = %entry.path().display(), "Skipping symlinked file");
                        excluded.set(excluded.get() + 1);
                    }
                }
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Cannot read directory entry");
                    errors += 1;
                }
            }
        }

        Walk {
            files,
            excluded: excluded.get(),
            errors,
        }
    }
}

fn advance(file: &Path, from: UpdateState, to: UpdateState) -> UpdateState {
    tracing::trace!(path = %file.display(), ?from, ?to, "Update state");
    to
}
