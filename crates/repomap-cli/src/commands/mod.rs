//! Command implementations

pub mod generate;

pub use generate::{print_summary, run_generate};
