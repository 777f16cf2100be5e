//! Domain Value Objects
//!
//! Immutable types describing a deployment: where it goes, how arguments are
//! quoted, which supervisor owns the service and how long a step may take.

mod config_file;
mod control;
pub mod shell;
mod supervisor;
mod target;

pub use config_file::{ConfigFileNames, SyncExcludes, DEFAULT_CONFIG_EXTENSION};
pub use control::{CancelToken, StepControl};
pub use shell::{quote, Script};
pub use supervisor::Supervisor;
pub use target::{join_remote, DeploymentTarget, ReleaseLayout, CURRENT_DIR, PREVIOUS_DIR};
