//! Per-run counters and the summary printed at the end of a run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Counters accumulated over one run.
///
/// A single instance is created per run and passed by `&mut` to every step
/// that reports progress.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    started: Instant,
    files_processed: usize,
    files_modified: usize,
    files_skipped: usize,
    errors: usize,
    backup_bytes: u64,
    map_file: Option<PathBuf>,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            files_processed: 0,
            files_modified: 0,
            files_skipped: 0,
            errors: 0,
            backup_bytes: 0,
            map_file: None,
        }
    }

    pub fn record_processed(&mut self) {
        self.files_processed += 1;
    }

    pub fn record_modified(&mut self) {
        self.files_modified += 1;
    }

    pub fn record_skipped(&mut self) {
        self.files_skipped += 1;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn record_backup(&mut self, bytes: u64) {
        self.backup_bytes += bytes;
    }

    /// Remember where the map artifact was written.
    pub fn record_map_file(&mut self, path: impl Into<PathBuf>) {
        self.map_file = Some(path.into());
    }

    pub fn files_processed(&self) -> usize {
        self.files_processed
    }

    pub fn files_modified(&self) -> usize {
        self.files_modified
    }

    pub fn files_skipped(&self) -> usize {
        self.files_skipped
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn backup_bytes(&self) -> u64 {
        self.backup_bytes
    }

    pub fn map_file(&self) -> Option<&Path> {
        self.map_file.as_deref()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Snapshot the counters for reporting.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            map_file_saved: self.map_file.is_some(),
            map_file_location: self.map_file.as_ref().map(|p| p.display().to_string()),
            files_processed: self.files_processed,
            files_modified: self.files_modified,
            files_skipped: self.files_skipped,
            backup_size_mb: round2(self.backup_bytes as f64 / BYTES_PER_MB),
            errors: self.errors,
            elapsed_secs: round2(self.elapsed().as_secs_f64()),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Point-in-time view of [`RunMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub map_file_saved: bool,
    pub map_file_location: Option<String>,
    pub files_processed: usize,
    pub files_modified: usize,
    pub files_skipped: usize,
    pub backup_size_mb: f64,
    pub errors: usize,
    pub elapsed_secs: f64,
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Metrics Summary ---")?;
        match (&self.map_file_location, self.map_file_saved) {
            (Some(location), true) => {
                writeln!(f, "Map file saved: Yes")?;
                writeln!(f, "Map file location: {location}")?;
            }
            _ => writeln!(f, "Map file saved: No")?,
        }
        writeln!(f, "Total files processed: {}", self.files_processed)?;
        writeln!(f, "Files modified: {}", self.files_modified)?;
        writeln!(f, "Files skipped: {}", self.files_skipped)?;
        writeln!(f, "Backup size: {:.2} MB", self.backup_size_mb)?;
        writeln!(f, "Errors encountered: {}", self.errors)?;
        write!(f, "Total execution time: {:.2} seconds", self.elapsed_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counters_accumulate() {
        let mut metrics = RunMetrics::new();
        metrics.record_processed();
        metrics.record_processed();
        metrics.record_modified();
        metrics.record_skipped();
        metrics.record_error();
        metrics.record_backup(512);
        metrics.record_backup(512);

        assert_eq!(metrics.files_processed(), 2);
        assert_eq!(metrics.files_modified(), 1);
        assert_eq!(metrics.files_skipped(), 1);
        assert_eq!(metrics.errors(), 1);
        assert_eq!(metrics.backup_bytes(), 1024);
    }

    #[test]
    fn summary_reports_megabytes() {
        let mut metrics = RunMetrics::new();
        metrics.record_backup(3 * 1024 * 1024 / 2);
        assert_eq!(metrics.summary().backup_size_mb, 1.5);
    }

    #[test]
    fn display_without_map_file() {
        let summary = MetricsSummary {
            map_file_saved: false,
            map_file_location: None,
            files_processed: 3,
            files_modified: 1,
            files_skipped: 2,
            backup_size_mb: 0.0,
            errors: 0,
            elapsed_secs: 0.25,
        };
        assert_eq!(
            summary.to_string(),
            "--- Metrics Summary ---\n\
             Map file saved: No\n\
             Total files processed: 3\n\
             Files modified: 1\n\
             Files skipped: 2\n\
             Backup size: 0.00 MB\n\
             Errors encountered: 0\n\
             Total execution time: 0.25 seconds"
        );
    }

    #[test]
    fn display_with_map_file() {
        let mut metrics = RunMetrics::new();
        metrics.record_map_file("/work/repo_map.md");
        let text = metrics.summary().to_string();
        assert!(text.contains("Map file saved: Yes\nMap file location: /work/repo_map.md\n"));
    }

    #[test]
    fn summary_serializes() {
        let metrics = RunMetrics::new();
        let json = serde_json::to_value(metrics.summary()).unwrap();
        assert_eq!(json["files_modified"], 0);
        assert_eq!(json["map_file_saved"], false);
    }
}
