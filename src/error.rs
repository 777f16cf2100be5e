//! Error types for Cutover
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::ports::{PromptError, RemoteError, TransferError};

/// Result type alias for pipeline operations
pub type CutoverResult<T> = Result<T, DeployError>;

/// Errors that abort a pipeline
#[derive(Error, Debug)]
pub enum DeployError {
    /// Confirmation gate rejection; the designed exit path, not a failure
    #[error("declined by user")]
    UserDeclined,

    /// Remote command exited non-zero (and was not a tolerated condition)
    #[error("{0}")]
    RemoteCommand(RemoteError),

    /// Content-transfer subprocess exited non-zero
    #[error("{0}")]
    Transfer(TransferError),

    /// Local config file absent for push
    #[error("config file not found: {} (create it, or fetch the live one with `cutover pull-config`)", .path.display())]
    ConfigurationMissing { path: PathBuf },

    /// A step exceeded its deadline
    #[error("{operation} timed out after {}s", .after.as_secs())]
    TimedOut {
        operation: &'static str,
        after: Duration,
    },

    /// Cancelled by the operator (Ctrl+C)
    #[error("cancelled")]
    Cancelled,

    /// Confirmation could not be asked
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl DeployError {
    /// Whether the error is the user's "no" at the confirmation gate
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::UserDeclined)
    }
}

impl From<RemoteError> for DeployError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::TimedOut { after } => Self::TimedOut {
                operation: "remote command",
                after,
            },
            RemoteError::Cancelled => Self::Cancelled,
            other => Self::RemoteCommand(other),
        }
    }
}

impl From<TransferError> for DeployError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::TimedOut { after } => Self::TimedOut {
                operation: "transfer",
                after,
            },
            TransferError::Cancelled => Self::Cancelled,
            other => Self::Transfer(other),
        }
    }
}

/// Errors while loading and resolving `.deploy.yml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not find .deploy.yml (looked for {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid deploy config in {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },

    #[error("target '{target}': {field}: {message}")]
    Interpolation {
        target: String,
        field: &'static str,
        message: String,
    },

    #[error("target '{target}': {message}")]
    Invalid { target: String, message: String },

    #[error("deploy config for target '{name}' does not exist (configured: {available})")]
    UnknownTarget { name: String, available: String },

    #[error("invalid value for {key}: {message}")]
    EnvOverride { key: &'static str, message: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
