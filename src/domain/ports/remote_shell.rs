//! Remote Shell Port
//!
//! Transport that runs one rendered script on a remote host. Exactly one
//! remote process per call; retries belong to the caller.

use std::time::Duration;

use thiserror::Error;

use crate::domain::value_objects::StepControl;

/// Captured output of one remote script execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteCommandResult {
    pub stdout: String,
    pub stderr: String,
    pub status: Option<i32>,
}

impl RemoteCommandResult {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            status: Some(0),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The remote script exited non-zero
    #[error("remote command failed{}: {}", exit_suffix(.status), .stderr.trim())]
    Failed {
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The transport could not be started
    #[error("failed to start remote shell: {0}")]
    Spawn(String),

    #[error("remote command timed out after {}s", .after.as_secs())]
    TimedOut { after: Duration },

    #[error("remote command cancelled")]
    Cancelled,
}

fn exit_suffix(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!(" (exit {})", code),
        None => String::new(),
    }
}

/// Runs scripts on a remote host.
///
/// Implementations:
/// - `SshShell`: `ssh <host> <script>`
/// - test fakes that interpret the generated scripts in memory
pub trait RemoteShell: Send + Sync {
    fn execute(
        &self,
        host: &str,
        script: &str,
        control: &StepControl,
    ) -> Result<RemoteCommandResult, RemoteError>;
}
