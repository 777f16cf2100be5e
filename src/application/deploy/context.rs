//! Per-run execution context
//!
//! Threaded through one pipeline run. Approval is recorded by producing a new
//! context, never by mutating the target or the loaded configuration.

use std::time::Duration;

use crate::domain::value_objects::{CancelToken, StepControl};
use crate::error::DeployError;

#[derive(Debug, Clone)]
pub struct RunContext {
    prompts_approved: bool,
    cancel: CancelToken,
}

impl RunContext {
    /// `silent` pre-approves every prompt of the run
    pub fn new(silent: bool, cancel: CancelToken) -> Self {
        Self {
            prompts_approved: silent,
            cancel,
        }
    }

    /// Context for the rest of the run after a human said yes
    pub fn approved(&self) -> Self {
        Self {
            prompts_approved: true,
            cancel: self.cancel.clone(),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.prompts_approved
    }

    pub fn check_cancelled(&self) -> Result<(), DeployError> {
        if self.cancel.is_cancelled() {
            Err(DeployError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Step control sharing this run's cancellation token
    pub fn control(&self, timeout: Option<Duration>) -> StepControl {
        StepControl::new(timeout, self.cancel.clone())
    }
}
