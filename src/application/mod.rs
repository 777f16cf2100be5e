//! Application Layer
//!
//! Use cases composed over the domain ports.
//! This layer:
//! - Depends on Domain layer (value objects, services, ports)
//! - Decides which remote failures are tolerated and which abort
//! - Never spawns processes or touches the terminal itself
//!
//! ## Building blocks
//!
//! - `RemoteExecutor` - Fail-fast script execution with failure logging
//! - `RemoteFilesystem` - Idempotent directory, move and symlink primitives
//! - `ServiceLifecycle` - Stop/start/restart with tolerated supervisor conditions
//! - `ConfirmationGate` - Yes/no gate with silent bypass
//! - `install` - Remote dependency installation
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - deploy, push-config and pull-config pipelines

pub mod confirm;
pub mod deploy;
pub mod executor;
pub mod install;
pub mod remote_fs;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use confirm::ConfirmationGate;
pub use deploy::{DeployOptions, DeployReport, DeployUseCase, PipelineSettings, RunContext};
pub use executor::{ExecOptions, RemoteExecutor};
pub use install::{install_dependencies, install_script, InstallReport};
pub use remote_fs::{MoveOutcome, RemoteFilesystem, NOTHING_TO_MOVE_MARKER};
pub use service::{ServiceLifecycle, ServiceOutcome};
