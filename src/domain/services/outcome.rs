//! Service Status Classifier
//!
//! Maps the raw diagnostic text of a failed supervisor command to a closed
//! set of outcomes. All stderr pattern matching lives here.

use std::fmt;

/// Why a failed supervisor command is allowed to continue the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleratedReason {
    /// Service is registered but not currently running
    NotRunning,
    /// Service is not registered with the supervisor at all
    NotRegistered,
}

impl ToleratedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotRunning => "not_running",
            Self::NotRegistered => "not_registered",
        }
    }

    /// Whether the condition deserves a warning rather than an info line
    pub fn is_warning(self) -> bool {
        matches!(self, Self::NotRegistered)
    }
}

impl fmt::Display for ToleratedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRunning => f.write_str("service is not running"),
            Self::NotRegistered => f.write_str("service is not registered"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleratedOutcome {
    /// Propagate and abort the pipeline
    Fatal,
    /// Log and continue
    Tolerated(ToleratedReason),
}

const NOT_RUNNING_PATTERNS: &[&str] = &["unknown instance"];

const NOT_REGISTERED_PATTERNS: &[&str] = &[
    "unknown job",
    "not loaded",
    "could not be found",
    "not-found",
    "does not exist",
];

/// Classify supervisor diagnostic text (case-insensitive).
pub fn classify_service_error(diagnostic: &str) -> ToleratedOutcome {
    let text = diagnostic.to_lowercase();
    if NOT_RUNNING_PATTERNS.iter().any(|p| text.contains(p)) {
        ToleratedOutcome::Tolerated(ToleratedReason::NotRunning)
    } else if NOT_REGISTERED_PATTERNS.iter().any(|p| text.contains(p)) {
        ToleratedOutcome::Tolerated(ToleratedReason::NotRegistered)
    } else {
        ToleratedOutcome::Fatal
    }
}
