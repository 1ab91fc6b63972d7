//! Interactive confirmation prompts
//!
//! Uses dialoguer for terminal-based confirmation. Every prompt defaults to
//! yes, so pressing enter accepts.

use std::path::PathBuf;

use dialoguer::Confirm;
use repomap_core::Decide;

use crate::error::{CliError, Result};

const PROCEED_PROMPT: &str = "Do you want to proceed with applying changes to existing files?";
const BACKUP_PROMPT: &str = "Do you want to create backups before modifying files?";
const COMMIT_PROMPT: &str = "Do you want to commit these changes to git?";

/// Answers confirmation points on the terminal, or automatically with `--yes`.
#[derive(Debug, Clone, Copy)]
pub struct PromptDecider {
    assume_yes: bool,
}

impl PromptDecider {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            tracing::debug!(prompt, "Answering yes without prompting");
            return Ok(true);
        }
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .show_default(true)
            .interact()?)
    }
}

impl Decide for PromptDecider {
    type Error = CliError;

    fn proceed(&mut self, _candidates: &[PathBuf]) -> Result<bool> {
        self.confirm(PROCEED_PROMPT)
    }

    fn backup(&mut self) -> Result<bool> {
        self.confirm(BACKUP_PROMPT)
    }

    fn commit(&mut self, _modified: &[PathBuf]) -> Result<bool> {
        self.confirm(COMMIT_PROMPT)
    }
}
