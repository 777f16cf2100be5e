//! Prompter Port
//!
//! Yes/no capture from a human. The confirmation gate works with any
//! implementation.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptError {
    /// No terminal attached to ask on
    #[error("cannot prompt: stdin is not a terminal (use --silent to skip confirmation)")]
    NotInteractive,

    #[error("prompt failed: {0}")]
    Io(String),
}

pub trait Prompter: Send + Sync {
    /// Ask `message`; `default` is used when the user just presses enter.
    fn ask(&self, message: &str, default: bool) -> Result<bool, PromptError>;
}

/// Prompter that always gives the same answer
pub struct FixedAnswer(pub bool);

impl Prompter for FixedAnswer {
    fn ask(&self, _message: &str, _default: bool) -> Result<bool, PromptError> {
        Ok(self.0)
    }
}
