//! Content Transfer Port
//!
//! Bulk directory mirroring and single-file push/pull between the local
//! working tree and a remote host.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::domain::value_objects::StepControl;

/// Output of a completed transfer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferOutput {
    pub stdout: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    /// The transfer tool exited non-zero
    #[error("transfer failed (exit {}): {}", exit_label(.status), .stderr.trim())]
    Failed { status: Option<i32>, stderr: String },

    /// The transfer tool could not be started
    #[error("failed to start transfer tool: {0}")]
    Spawn(String),

    #[error("transfer timed out after {}s", .after.as_secs())]
    TimedOut { after: Duration },

    #[error("transfer cancelled")]
    Cancelled,
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

/// Moves content between local and remote.
///
/// Any non-zero exit is fatal; partial transfers are not rolled back.
pub trait ContentTransfer: Send + Sync {
    /// Mirror `local_src` into `remote_dir`, deleting extraneous remote files
    /// and skipping the instance's fixed exclusion list.
    fn sync_directory(
        &self,
        local_src: &Path,
        host: &str,
        remote_dir: &str,
        control: &StepControl,
    ) -> Result<TransferOutput, TransferError>;

    /// Copy one local file to the remote host
    fn push_file(
        &self,
        local: &Path,
        host: &str,
        remote: &str,
        control: &StepControl,
    ) -> Result<TransferOutput, TransferError>;

    /// Copy one remote file to the local machine
    fn pull_file(
        &self,
        host: &str,
        remote: &str,
        local: &Path,
        control: &StepControl,
    ) -> Result<TransferOutput, TransferError>;
}
