//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Command line definitions
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use cutover::presentation::factory;
//!
//! let sink = factory::create_event_sink(&ui);
//! let use_case = factory::create_deploy_use_case(resolved, sink, cancel);
//! let report = use_case.deploy(&options)?;
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands};
pub use factory::{create_deploy_use_case, create_event_sink, ConcreteDeployUseCase};
