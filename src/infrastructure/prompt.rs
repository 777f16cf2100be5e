//! Terminal Prompter
//!
//! Yes/no confirmation on the controlling terminal via `dialoguer`.

use dialoguer::Confirm;
use is_terminal::IsTerminal;

use crate::domain::ports::{PromptError, Prompter};

#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        if !std::io::stdin().is_terminal() {
            return Err(PromptError::NotInteractive);
        }

        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(|e| PromptError::Io(e.to_string()))
    }
}
