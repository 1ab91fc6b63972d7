//! The standalone map artifact written at the project root

use std::path::{Path, PathBuf};

use repomap_fs::io;

use crate::Result;

/// Render the artifact text for `tree`.
pub fn render_map_file(tree: &str, name: &str) -> String {
    format!("```\n# Repository Map\n\n{tree}\n\nFile: {name}\n```\n")
}

/// Write the artifact to `<root>/<name>` and return its path.
pub fn write_map_file(root: &Path, name: &str, tree: &str) -> Result<PathBuf> {
    let path = root.join(name);
    io::write_text(&path, &render_map_file(tree, name))?;
    tracing::info!(path = %path.display(), "Generated repository map file");
    Ok(path)
}
