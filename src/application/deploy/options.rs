//! Deploy Options
//!
//! `DeployOptions` are per-invocation overrides; `PipelineSettings` carry the
//! resolved project settings shared by every pipeline.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::value_objects::{ConfigFileNames, Supervisor};

/// Default per-command deadline
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Default per-transfer deadline
pub const DEFAULT_TRANSFER_TIMEOUT: Duration = Duration::from_secs(1800);

/// Options for one deploy run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Local content to mirror into the release
    pub src: PathBuf,
    /// Run remote dependency installation in the new release
    pub install_dependencies: bool,
    /// Stop and start the supervised service around the cutover
    pub manage_service: bool,
    /// Link the live config file into the new release
    pub symlink_config_file: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            src: PathBuf::from("./"),
            install_dependencies: true,
            manage_service: true,
            symlink_config_file: true,
        }
    }
}

impl DeployOptions {
    pub fn with_src(mut self, src: impl Into<PathBuf>) -> Self {
        self.src = src.into();
        self
    }

    pub fn with_install_dependencies(mut self, enabled: bool) -> Self {
        self.install_dependencies = enabled;
        self
    }

    pub fn with_manage_service(mut self, enabled: bool) -> Self {
        self.manage_service = enabled;
        self
    }

    pub fn with_symlink_config_file(mut self, enabled: bool) -> Self {
        self.symlink_config_file = enabled;
        self
    }
}

/// Project-wide settings the pipelines run with
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub supervisor: Supervisor,
    pub config_files: ConfigFileNames,
    /// Replaces the default npm install statements
    pub install_command: Option<String>,
    pub command_timeout: Option<Duration>,
    pub transfer_timeout: Option<Duration>,
    /// Directory relative sources and local config files resolve against
    pub local_root: PathBuf,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            supervisor: Supervisor::default(),
            config_files: ConfigFileNames::default(),
            install_command: None,
            command_timeout: Some(DEFAULT_COMMAND_TIMEOUT),
            transfer_timeout: Some(DEFAULT_TRANSFER_TIMEOUT),
            local_root: PathBuf::from("."),
        }
    }
}

impl PipelineSettings {
    pub fn with_local_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.local_root = root.into();
        self
    }

    pub fn with_supervisor(mut self, supervisor: Supervisor) -> Self {
        self.supervisor = supervisor;
        self
    }
}
