//! Confirmation gate in front of destructive pipelines.

use crate::domain::ports::{DeployEvent, DeployEventSink, Prompter};
use crate::error::DeployError;

pub struct ConfirmationGate<'a> {
    prompter: &'a dyn Prompter,
    events: &'a dyn DeployEventSink,
}

impl<'a> ConfirmationGate<'a> {
    pub fn new(prompter: &'a dyn Prompter, events: &'a dyn DeployEventSink) -> Self {
        Self { prompter, events }
    }

    /// Ask a yes/no question.
    ///
    /// With `silent` the prompter is never consulted: the answer is taken
    /// as yes and a `PromptSkipped` event is emitted instead. A "no"
    /// becomes `DeployError::UserDeclined`.
    pub fn confirm(&self, message: &str, default: bool, silent: bool) -> Result<(), DeployError> {
        if silent {
            self.events.on_event(DeployEvent::PromptSkipped {
                message: message.to_string(),
            });
            return Ok(());
        }

        if self.prompter.ask(message, default)? {
            Ok(())
        } else {
            Err(DeployError::UserDeclined)
        }
    }
}
