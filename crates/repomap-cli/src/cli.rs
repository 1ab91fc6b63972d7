//! CLI argument parsing using clap derive

use clap::Parser;
use repomap_core::RunOptions;

/// Generate a repository map and optionally embed it in every source file
#[derive(Parser, Debug)]
#[command(name = "repomap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Update existing files with the repository map
    #[arg(long)]
    pub update_files: bool,

    /// Create backups of files before modifying (only applicable with --update-files)
    #[arg(long)]
    pub backup: bool,

    /// Force update files even if backup fails
    #[arg(long)]
    pub force: bool,

    /// Output file name for the map file [default: repo_map.md]
    #[arg(long, value_name = "NAME")]
    pub output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Print the metrics summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Flags relevant to the run itself.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            update_files: self.update_files,
            backup: self.backup,
            force: self.force,
            verbose: self.verbose,
            output: self.output.clone(),
        }
    }
}
