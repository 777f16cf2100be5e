//! Common test utilities for Cutover end-to-end tests.
//!
//! - `TestEnv`: isolated project, remote and log directories
//! - Fake `ssh`, `rsync` and supervisor executables

#![allow(dead_code)]

pub mod env;
pub mod fakes;

pub use env::*;
