//! Staging and committing the files rewritten by a run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use git2::{ErrorCode, Repository};
use repomap_fs::{RepoPath, io};

use crate::{Error, Result};

/// Message used for every map-update commit.
pub const COMMIT_MESSAGE: &str = "Update repository map";

/// Information about a single commit.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// Short commit hash (7 characters)
    pub hash: String,

    /// First line of the commit message
    pub message: String,

    /// Commit author name
    pub author: String,

    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

impl CommitInfo {
    fn from_commit(commit: &git2::Commit<'_>) -> Self {
        let timestamp = Utc
            .timestamp_opt(commit.time().seconds(), 0)
            .single()
            .unwrap_or_default();

        let message = commit
            .message()
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or("")
            .to_string();

        let author = commit.author().name().unwrap_or("Unknown").to_string();

        Self {
            hash: format!("{:.7}", commit.id()),
            message,
            author,
            timestamp,
        }
    }
}

/// Whether `root` carries a `.git` marker.
pub fn is_repository(root: &Path) -> bool {
    root.join(RepoPath::GitDir).exists()
}

/// Stage `files` and commit them on top of HEAD.
///
/// Files are given as absolute paths inside the repository working directory.
/// An unborn HEAD produces a root commit. The committer identity comes from the
/// repository's git configuration.
pub fn commit_files(root: &Path, files: &[PathBuf], message: &str) -> Result<CommitInfo> {
    let repo = Repository::open(root)?;
    let workdir = repo.workdir().ok_or_else(|| Error::BareRepository {
        path: root.to_path_buf(),
    })?;
    let workdir = io::canonicalize(workdir)?;

    let mut index = repo.index()?;
    for file in files {
        let relative = relative_to_workdir(&workdir, file)?;
        tracing::debug!(path = %relative.display(), "Staging file");
        index.add_path(&relative)?;
    }
    index.write()?;

    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    let signature = repo.signature()?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
        Err(e) => return Err(e.into()),
    };
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    let oid = repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )?;
    let commit = repo.find_commit(oid)?;
    let info = CommitInfo::from_commit(&commit);

    tracing::info!(hash = %info.hash, files = files.len(), "Committed repository map update");
    Ok(info)
}

fn relative_to_workdir(workdir: &Path, file: &Path) -> Result<PathBuf> {
    let absolute = if file.is_absolute() {
        file.to_path_buf()
    } else {
        workdir.join(file)
    };
    let absolute = io::canonicalize(&absolute)?;
    absolute
        .strip_prefix(workdir)
        .map(Path::to_path_buf)
        .map_err(|_| Error::OutsideRepository { path: absolute.clone() })
}
