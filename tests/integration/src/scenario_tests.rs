//! End-to-end scenarios across filtering, rendering, updating, backups and
//! version control.
//!
//! Each test drives the library crates the way the `repomap` binary does,
//! with pre-resolved answers instead of prompts.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use repomap_blocks::{MapBlockCodec, style_for};
use repomap_core::{
    BackupManager, BackupPlanner, PathFilter, RunConfig, RunMetrics, RunOptions, TreeRenderer,
    UpdateOrchestrator, write_map_file,
};
use repomap_git::{COMMIT_MESSAGE, commit_files, is_repository};
use repomap_test_utils::git::real_git_repo;
use repomap_test_utils::project::{TestProject, list_files};
use std::path::PathBuf;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// One generate-and-update pass over a project.
struct Pass {
    tree: String,
    modified: Vec<PathBuf>,
    metrics: RunMetrics,
}

fn update_pass(project: &TestProject, backups: Option<&BackupManager>) -> Pass {
    let config = RunConfig::load(
        &project.root(),
        &RunOptions {
            update_files: true,
            ..Default::default()
        },
    )
    .expect("Should resolve config");
    let filter = PathFilter::new(config.rules.clone());
    let tree = TreeRenderer::new(&filter)
        .render(&project.root())
        .expect("Should render tree");

    let mut metrics = RunMetrics::new();
    let path = write_map_file(&project.root(), &config.output, &tree).expect("Should write map");
    metrics.record_map_file(path);

    let mut orchestrator = UpdateOrchestrator::new(project.root(), &tree, &filter);
    if let Some(manager) = backups {
        orchestrator = orchestrator.with_backups(manager);
    }
    let modified = orchestrator.run(&mut metrics);

    Pass {
        tree,
        modified,
        metrics,
    }
}

fn python_module(lines: usize) -> String {
    (1..=lines).map(|i| format!("value_{i} = {i}\n")).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_vendor_directory_is_left_alone() {
    let project = TestProject::new();
    let main = python_module(20);
    project.write("src/main.py", &main);
    project.write("src/vendor/lib.py", "def vendored(): pass\n");

    let pass = update_pass(&project, None);

    assert_eq!(pass.modified, vec![project.path("src/main.py")]);
    assert_eq!(pass.tree, "project/\n└── src/\n    └── main.py");
    assert!(!pass.tree.contains("vendor"));

    let updated = project.read("src/main.py");
    assert!(updated.starts_with("# Repository Map:\n"));
    assert!(updated.ends_with(&main));
    assert_eq!(project.read("src/vendor/lib.py"), "def vendored(): pass\n");
}

#[test]
fn test_second_pass_modifies_nothing() {
    let project = TestProject::new();
    for name in ["api/routes.py", "api/models.py", "web/app.js", "web/style.css", "notes.md"] {
        project.write(name, "content\n");
    }

    let first = update_pass(&project, None);
    assert_eq!(first.metrics.files_modified(), 5);

    let second = update_pass(&project, None);
    assert_eq!(second.tree, first.tree);
    assert_eq!(second.metrics.files_modified(), 0);
    assert!(second.modified.is_empty());
    // Five unchanged files plus the excluded map artifact
    assert_eq!(second.metrics.files_skipped(), 6);
    assert_eq!(second.metrics.errors(), 0);
}

#[test]
fn test_new_file_refreshes_every_block() {
    let project = TestProject::new();
    project.write("a.py", "a = 1\n");
    project.write("b.py", "b = 2\n");
    update_pass(&project, None);

    project.write("c.py", "c = 3\n");
    let pass = update_pass(&project, None);
    assert_eq!(pass.modified.len(), 3);

    for name in ["a.py", "b.py", "c.py"] {
        let content = project.read(name);
        assert_eq!(content.matches("# Repository Map:").count(), 1, "{name}");
        assert!(content.contains("# └── c.py\n"), "{name}");
    }
    assert!(project.read("a.py").ends_with("# File: a.py\na = 1\n"));
}

#[test]
fn test_long_backup_path_falls_back_to_digest() {
    let project = TestProject::new();
    let deep = "level_one/level_two/level_three/level_four/handler.py";
    project.write(deep, "def handle(): pass\n");

    let planner = BackupPlanner::new(project.path(".tree_map_backup/run"), project.root())
        .with_max_path_len(project.path(".tree_map_backup/run").to_string_lossy().len() + 20);
    let manager = BackupManager::new(planner);
    manager.prepare().unwrap();

    let pass = update_pass(&project, Some(&manager));

    assert_eq!(pass.modified, vec![project.path(deep)]);
    let backups = list_files(&project.path(".tree_map_backup/run"));
    assert_eq!(backups.len(), 1);
    assert!(!backups[0].contains('/'), "fallback backup must be flat: {backups:?}");
    assert!(backups[0].ends_with(".py"));
    assert_eq!(
        std::fs::read_to_string(project.path(".tree_map_backup/run").join(&backups[0])).unwrap(),
        "def handle(): pass\n"
    );
    project.assert_file_contains(deep, "# Repository Map:");
    assert_eq!(pass.metrics.backup_bytes(), 19);
}

#[test]
fn test_backups_are_never_mapped() {
    let project = TestProject::new();
    project.write("main.py", "pass\n");

    let manager = BackupManager::new(BackupPlanner::new(
        project.path(".tree_map_backup/first"),
        project.root(),
    ));
    manager.prepare().unwrap();
    update_pass(&project, Some(&manager));

    project.write("extra.py", "pass\n");
    update_pass(&project, None);

    assert_eq!(project.read(".tree_map_backup/first/main.py"), "pass\n");
}

#[test]
fn test_modified_files_are_committed() {
    let project = TestProject::new();
    real_git_repo(&project.root());
    project.write("src/lib.rs", "pub fn lib() {}\n");
    project.write("src/main.rs", "fn main() {}\n");

    let pass = update_pass(&project, None);
    assert!(is_repository(&project.root()));

    let info = commit_files(&project.root(), &pass.modified, COMMIT_MESSAGE).unwrap();
    assert_eq!(info.message, COMMIT_MESSAGE);

    let repo = git2::Repository::open(project.root()).unwrap();
    let tree = repo.head().unwrap().peel_to_tree().unwrap();
    assert!(tree.get_path(std::path::Path::new("src/lib.rs")).is_ok());
    assert!(tree.get_path(std::path::Path::new("src/main.rs")).is_ok());
    assert!(tree.get_path(std::path::Path::new("repo_map.md")).is_err());
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(format!("{:.7}", head.id()), info.hash);
}

#[test]
fn test_project_config_adds_exclusions() {
    let project = TestProject::new();
    project.write(".repomap.toml", "[exclude]\ndirs = [\"generated\"]\n");
    project.write("generated/schema.py", "SCHEMA = {}\n");
    project.write("app.py", "run()\n");

    let pass = update_pass(&project, None);

    assert_eq!(pass.modified, vec![project.path("app.py")]);
    assert!(!pass.tree.contains("generated"));
    assert_eq!(project.read("generated/schema.py"), "SCHEMA = {}\n");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn render_is_deterministic(files in prop::collection::btree_set("[a-c]{1,2}(/[a-c]{1,2}){0,2}\\.rs", 1..8)) {
        let project = TestProject::new();
        for file in &files {
            project.write(file, "");
        }
        let filter = PathFilter::new(RunConfig::resolve(&RunOptions::default(), &Default::default()).unwrap().rules);
        let renderer = TreeRenderer::new(&filter);
        prop_assert_eq!(renderer.render(&project.root()).unwrap(), renderer.render(&project.root()).unwrap());
    }

    #[test]
    fn non_map_bytes_survive(prefix in "[a-z =\n]{0,40}", suffix in "[a-z =\n]{0,40}") {
        let codec = MapBlockCodec::new(style_for("py")).unwrap();
        let old_block = codec.encode("old/", "f.py");
        let content = format!("{prefix}{old_block}{suffix}");
        let applied = codec.apply(&content, "new/\n└── f.py", "f.py");
        let new_block = codec.encode("new/\n└── f.py", "f.py");
        let range = codec.find(&applied.content).unwrap();
        prop_assert_eq!(&applied.content[range.clone()], new_block.as_str());
        prop_assert_eq!(
            applied.content.len() - new_block.len(),
            content.len() - old_block.len()
        );
        prop_assert_eq!(&applied.content[range.end..], suffix.as_str());
    }
}
