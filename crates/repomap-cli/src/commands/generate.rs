//! The generate run: render, write the map, then optionally update files
//!
//! Steps, each gated on the previous one:
//!
//! 1. Render the tree and write the map artifact
//! 2. Preview the files an update would touch (`--update-files`)
//! 3. Confirm, optionally back up, and rewrite the files
//! 4. Offer to commit the rewritten files when the root is a git repository

use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;
use repomap_core::{
    BackupManager, BackupPlanner, Decide, MetricsSummary, PathFilter, RunConfig, RunMetrics,
    TreeRenderer, UpdateOrchestrator, write_map_file,
};
use repomap_git::{COMMIT_MESSAGE, CommitInfo, commit_files, is_repository};

use crate::error::{CliError, Result};

/// What a generate run produced.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Where the map artifact was written, if it was
    pub map_file: Option<PathBuf>,
    /// Files listed in the update preview
    pub candidates: Vec<PathBuf>,
    /// Files rewritten with a fresh map block
    pub modified: Vec<PathBuf>,
    /// Backup root of this run, if backups were made
    pub backup_root: Option<PathBuf>,
    /// The commit recording the rewritten files
    pub commit: Option<CommitInfo>,
}

/// Run the generator over `root`.
///
/// Per-file failures, a failed map write and a failed commit are counted in
/// `metrics` and do not fail the run.
pub fn run_generate<D>(
    root: &Path,
    config: &RunConfig,
    decider: &mut D,
    metrics: &mut RunMetrics,
) -> Result<GenerateReport>
where
    D: Decide,
    CliError: From<D::Error>,
{
    if !root.is_dir() {
        return Err(CliError::user(format!("Not a directory: {}", root.display())));
    }
    let mut report = GenerateReport::default();

    tracing::info!("Generating repository tree...");
    let filter = PathFilter::new(config.rules.clone());
    let tree = TreeRenderer::new(&filter).render(root)?;

    match write_map_file(root, &config.output, &tree) {
        Ok(path) => {
            println!(
                "{} Repository map written to {}",
                "OK".green().bold(),
                path.display().to_string().cyan()
            );
            metrics.record_map_file(&path);
            report.map_file = Some(path);
        }
        Err(e) => {
            tracing::error!(error = %e, "Error generating map file");
            metrics.record_error();
        }
    }

    if !config.update_files {
        return Ok(report);
    }

    tracing::info!("Previewing changes...");
    report.candidates = UpdateOrchestrator::new(root, &tree, &filter).candidates();
    for candidate in &report.candidates {
        println!("Would update repo map in: {}", candidate.display());
    }
    if report.candidates.is_empty() {
        tracing::info!("No files to update. Exiting.");
        return Ok(report);
    }

    if !decider.proceed(&report.candidates)? {
        println!("{} File updates cancelled.", "=>".blue().bold());
        return Ok(report);
    }

    let backups = if config.backup && decider.backup()? {
        let planner = BackupPlanner::timestamped(root, Local::now())
            .with_max_path_len(config.max_backup_path_len);
        let manager = BackupManager::new(planner);
        manager.prepare()?;
        Some(manager)
    } else {
        None
    };

    tracing::info!("Updating files with new tree map...");
    let mut orchestrator = UpdateOrchestrator::new(root, &tree, &filter).with_force(config.force);
    if let Some(manager) = &backups {
        orchestrator = orchestrator.with_backups(manager);
    }
    report.modified = orchestrator.run(metrics);

    if report.modified.is_empty() {
        tracing::info!("No files were modified.");
    } else {
        println!(
            "{} Updated {} files.",
            "OK".green().bold(),
            report.modified.len()
        );
        if is_repository(root) && decider.commit(&report.modified)? {
            report.commit = commit(root, &report.modified, metrics);
        }
    }

    if let Some(manager) = backups {
        println!(
            "Backup of original files is available at: {}",
            manager.backup_root().display().to_string().cyan()
        );
        report.backup_root = Some(manager.backup_root().to_path_buf());
    }

    Ok(report)
}

fn commit(root: &Path, modified: &[PathBuf], metrics: &mut RunMetrics) -> Option<CommitInfo> {
    match commit_files(root, modified, COMMIT_MESSAGE) {
        Ok(info) => {
            println!(
                "{} Committed changes as {}",
                "OK".green().bold(),
                info.hash.yellow()
            );
            Some(info)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to commit changes to git");
            metrics.record_error();
            None
        }
    }
}

/// Print the end-of-run summary, as text or JSON.
pub fn print_summary(summary: &MetricsSummary, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => {
                println!("{text}");
                return;
            }
            Err(e) => tracing::warn!(error = %e, "Cannot serialize summary, printing text"),
        }
    }
    println!();
    println!("{summary}");
}
