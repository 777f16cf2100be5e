//! Cutover - versioned release deployment over ssh and rsync
//!
//! Deploys a local directory to a remote host as a new release directory,
//! keeps the previous release next to it, and switches a live symlink over
//! once the release is in place. Also pushes and pulls the per-target
//! application config file.
//!
//! ## Layers
//!
//! - `domain` - Value objects, ports and the supervisor status classifier
//! - `application` - Remote primitives and the deploy pipelines
//! - `infrastructure` - ssh, rsync, terminal prompt and event sinks
//! - `config` - `.deploy.yml` loading and target resolution
//! - `presentation` - CLI definitions and use case wiring

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod ui;

// Re-exports for convenience
pub use application::{DeployOptions, DeployReport, DeployUseCase, PipelineSettings};
pub use config::{DeployFile, ResolveOptions, ResolvedTarget};
pub use domain::value_objects::{DeploymentTarget, Supervisor};
pub use error::{ConfigError, CutoverResult, DeployError};
