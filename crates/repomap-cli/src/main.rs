//! Repository map generator CLI
//!
//! Renders the project tree of the current directory into a map file and,
//! with `--update-files`, embeds it as a comment block in every source file.

mod cli;
mod commands;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;
use repomap_core::{RunConfig, RunMetrics};

use cli::Cli;
use error::Result;
use interactive::PromptDecider;

fn main() {
    let cli = Cli::parse();
    // A second subscriber is the only failure mode; logging stays usable
    let _ = logging::init(cli.verbose);

    let mut metrics = RunMetrics::new();
    let result = run(&cli, &mut metrics);
    if let Err(e) = &result {
        eprintln!("{}: {}", "error".red().bold(), e);
        tracing::error!(error = %e, "An unexpected error occurred");
        metrics.record_error();
    }

    commands::print_summary(&metrics.summary(), cli.json);

    if result.is_err() {
        std::process::exit(1);
    }
}

fn run(cli: &Cli, metrics: &mut RunMetrics) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let root = repomap_fs::io::canonicalize(&cwd)?;
    tracing::debug!(root = %root.display(), "Resolved project root");

    let config = RunConfig::load(&root, &cli.run_options())?;
    let mut decider = PromptDecider::new(cli.yes);
    let report = commands::run_generate(&root, &config, &mut decider, metrics)?;
    tracing::debug!(
        map_file = ?report.map_file,
        candidates = report.candidates.len(),
        modified = report.modified.len(),
        backup_root = ?report.backup_root,
        commit = ?report.commit.as_ref().map(|c| c.hash.as_str()),
        "Run finished"
    );
    Ok(())
}
