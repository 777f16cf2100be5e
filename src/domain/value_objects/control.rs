//! Step Control
//!
//! Per-step deadline and cancellation, passed with every remote execution and
//! transfer so a stalled call can be aborted and reported distinctly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Deadline and cancellation for one remote round trip.
#[derive(Debug, Clone, Default)]
pub struct StepControl {
    /// Kill the subprocess after this long (`None` waits forever)
    pub timeout: Option<Duration>,
    pub cancel: CancelToken,
}

impl StepControl {
    pub fn new(timeout: Option<Duration>, cancel: CancelToken) -> Self {
        Self { timeout, cancel }
    }

    /// No deadline and a token nobody else holds
    pub fn unbounded() -> Self {
        Self::default()
    }
}
