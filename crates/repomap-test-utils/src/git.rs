//! Git repository fixtures at three realism levels.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Creates a minimal `.git` directory structure **without** initialising a real
/// git repository.
///
/// Realism level: **FAKE**: satisfies `.git` marker detection only.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir(path.join(".git"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Initialises a real git repository using `git2` with a committer identity
/// configured, but no commits.
///
/// Realism level: **REAL**: valid git object store, unborn HEAD.
///
/// # Panics
/// Panics if `git2` initialisation or configuration fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    let repo = git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    });
    {
        let mut config = repo
            .config()
            .unwrap_or_else(|e| panic!("real_git_repo: failed to open config: {e}"));
        config
            .set_str("user.name", "Test User")
            .unwrap_or_else(|e| panic!("real_git_repo: failed to set user.name: {e}"));
        config
            .set_str("user.email", "test@test.com")
            .unwrap_or_else(|e| panic!("real_git_repo: failed to set user.email: {e}"));
    }
    repo
}

/// Initialises a real git repository with an initial commit using the `git` CLI.
///
/// Realism level: **REAL WITH HISTORY**: `main` branch, one commit adding
/// `README.md`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    let run = |args: &[&str]| {
        let output = Command::new("git")
            .args(args)
            .current_dir(path)
            .output()
            .unwrap_or_else(|e| {
                panic!("real_git_repo_with_commit: failed to run `git {args:?}`: {e}")
            });
        if !output.status.success() {
            panic!(
                "real_git_repo_with_commit: `git {args:?}` failed:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
    };

    run(&["init"]);
    run(&["config", "user.email", "test@test.com"]);
    run(&["config", "user.name", "Test User"]);
    run(&["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));

    run(&["add", "."]);
    run(&["commit", "-m", "Initial commit"]);
    // Older git versions may not support renaming here
    let _ = Command::new("git")
        .args(["branch", "-m", "main"])
        .current_dir(path)
        .output();
}
