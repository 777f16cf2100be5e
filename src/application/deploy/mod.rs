//! Deploy Module
//!
//! Orchestrates the three pipelines run against a deployment target.
//!
//! ## Structure
//!
//! - `context` - Per-run execution context (`RunContext`)
//! - `options` - Invocation and pipeline settings (`DeployOptions`, `PipelineSettings`)
//! - `result` - Result types (`DeployReport`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use cutover::application::deploy::{DeployOptions, DeployUseCase, PipelineSettings};
//!
//! let use_case = DeployUseCase::new(target, settings, shell, transfer, prompter);
//! let report = use_case.deploy(&DeployOptions::default())?;
//! ```

mod context;
mod options;
mod result;
mod use_case;

pub use context::RunContext;
pub use options::{
    DeployOptions, PipelineSettings, DEFAULT_COMMAND_TIMEOUT, DEFAULT_TRANSFER_TIMEOUT,
};
pub use result::DeployReport;
pub use use_case::DeployUseCase;
