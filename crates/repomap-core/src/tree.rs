//! Deterministic text rendering of the filtered project tree.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use repomap_fs::io;

use crate::Result;
use crate::filter::PathFilter;

const BRANCH: &str = "├── ";
const LAST: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Renders a project directory as an indented tree of names.
///
/// Files come before subdirectories at every level, each group sorted by
/// name. Symlinked directories are listed but not descended into.
#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer<'a> {
    filter: &'a PathFilter,
}

struct Children {
    files: Vec<OsString>,
    dirs: Vec<(OsString, PathBuf, bool)>,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(filter: &'a PathFilter) -> Self {
        Self { filter }
    }

    /// Render the tree rooted at `root`.
    ///
    /// The first line is the root's own name followed by `/`. Unreadable
    /// subdirectories are rendered without children.
    ///
    /// # Errors
    /// Fails if `root` cannot be resolved or listed.
    pub fn render(&self, root: &Path) -> Result<String> {
        let root = io::canonicalize(root)?;
        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        let mut lines = vec![format!("{name}/")];
        let children = self.children(&root, &root)?;
        self.render_children(&root, children, "", &mut lines);
        close_trailing_branches(&mut lines);

        tracing::debug!(root = %root.display(), lines = lines.len(), "Rendered repository tree");
        Ok(lines.join("\n"))
    }

    fn render_children(&self, root: &Path, children: Children, prefix: &str, lines: &mut Vec<String>) {
        let total = children.files.len() + children.dirs.len();

        for (i, name) in children.files.iter().enumerate() {
            let connector = if i + 1 == total { LAST } else { BRANCH };
            lines.push(format!("{prefix}{connector}{}", name.to_string_lossy()));
        }

        let dir_count = children.dirs.len();
        for (i, (name, path, is_symlink)) in children.dirs.into_iter().enumerate() {
            let is_last = i + 1 == dir_count;
            let connector = if is_last { LAST } else { BRANCH };
            lines.push(format!("{prefix}{connector}{}/", name.to_string_lossy()));

            if is_symlink {
                continue;
            }
            match self.children(root, &path) {
                Ok(grandchildren) => {
                    let extension = if is_last { SPACE } else { PIPE };
                    self.render_children(root, grandchildren, &format!("{prefix}{extension}"), lines);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Cannot list directory");
                }
            }
        }
    }

    fn children(&self, root: &Path, dir: &Path) -> Result<Children> {
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
            // Follows symlinks; dangling links and special files are dropped
            let Ok(metadata) = fs::metadata(&path) else {
                continue;
            };

            if self.filter.should_exclude_as(&path, root, metadata.is_file()) {
                continue;
            }
            if metadata.is_file() {
                files.push(entry.file_name());
            } else if metadata.is_dir() {
                dirs.push((entry.file_name(), path, is_symlink));
            }
        }

        files.sort();
        dirs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Children { files, dirs })
    }
}

/// Re-indent the run of top-level `└── ` lines at the end of the output.
///
/// Walking backwards, the i-th such line from the end gets `i` levels of
/// indentation. A rendered tree has at most one top-level `└── ` line, so in
/// practice this leaves the output unchanged.
fn close_trailing_branches(lines: &mut [String]) {
    if lines.len() <= 1 {
        return;
    }
    let names: Vec<String> = lines[1..]
        .iter()
        .rev()
        .map_while(|line| line.strip_prefix(LAST).map(str::to_string))
        .collect();

    let len = lines.len();
    for (i, name) in names.iter().enumerate() {
        lines[len - i - 1] = format!("{}{LAST}{name}", SPACE.repeat(i));
    }
}
