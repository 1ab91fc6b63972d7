//! [`TestProject`] builder for scratch project trees.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with helpers for laying out files and
/// asserting on their content afterwards.
///
/// # Example
///
/// ```rust,no_run
/// use repomap_test_utils::project::TestProject;
///
/// let project = TestProject::new();
/// project.write("src/main.py", "print('hi')\n");
/// project.assert_file_contains("src/main.py", "print");
/// ```
pub struct TestProject {
    _temp_dir: TempDir,
    /// Canonical project root inside the temp dir.
    root: PathBuf,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty project directory named `project`.
    pub fn new() -> Self {
        Self::named("project")
    }

    /// Create an empty project directory with the given name.
    ///
    /// The name shows up as the first line of rendered trees, so tests that
    /// snapshot trees use a fixed name rather than the random temp dir name.
    pub fn named(name: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(name);
        fs::create_dir_all(&root).unwrap();
        let root = fs::canonicalize(&root).unwrap();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Return the project root path.
    pub fn root(&self) -> PathBuf {
        self.root.clone()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a text file, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        self.write_bytes(relative, content.as_bytes())
    }

    /// Write a raw byte file, creating parent directories.
    pub fn write_bytes(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Create an empty directory.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Read a file as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `relative` exists.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `relative` contains `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            relative,
            content,
            file_content
        );
    }

    /// Assert that the file at `relative` does **not** contain `content`.
    pub fn assert_file_not_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            !file_content.contains(content),
            "File {} unexpectedly contains: {}\nActual: {}",
            relative,
            content,
            file_content
        );
    }
}

/// Collect every regular file under `dir`, relative and sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(base, &path, out);
            } else {
                let relative = path.strip_prefix(base).unwrap();
                out.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }

    let mut files = Vec::new();
    if dir.exists() {
        walk(dir, dir, &mut files);
    }
    files.sort();
    files
}
