//! Yes/no confirmation before anything is sent.

use dialoguer::Confirm as Prompt;
use santa_types::{Result, SantaError};

/// Asks whether to go ahead after showing `summary`.
pub trait Confirm {
    fn confirm(&self, summary: &str) -> Result<bool>;
}

/// Interactive prompt on the terminal. Defaults to "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, summary: &str) -> Result<bool> {
        println!("{summary}\n");
        Prompt::new()
            .with_prompt("Proceed?")
            .default(false)
            .interact()
            .map_err(|e| SantaError::Io(e.to_string()))
    }
}

/// Fixed answer, for `--yes` and tests.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, summary: &str) -> Result<bool> {
        tracing::debug!(answer = self.0, lines = summary.lines().count(), "Auto-confirm");
        Ok(self.0)
    }
}
