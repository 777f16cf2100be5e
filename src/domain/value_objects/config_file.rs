//! Application Config File Naming
//!
//! Locally each target keeps `config.<target>.<ext>`; remotely the live file is
//! `config.<ext>` inside the application base directory, and each release
//! links `config.<ext>` to `../config.<ext>`.

use std::path::{Path, PathBuf};

use super::target::{join_remote, DeploymentTarget};

/// Default extension of the application config file
pub const DEFAULT_CONFIG_EXTENSION: &str = "js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFileNames {
    extension: String,
}

impl ConfigFileNames {
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `config.<ext>`
    pub fn remote_file_name(&self) -> String {
        format!("config.{}", self.extension)
    }

    /// `config.<target>.<ext>` under `root`
    pub fn local_path(&self, root: &Path, target: &DeploymentTarget) -> PathBuf {
        root.join(format!("config.{}.{}", target.name(), self.extension))
    }

    /// `<app_location>/config.<ext>`
    pub fn remote_path(&self, target: &DeploymentTarget) -> String {
        join_remote(target.app_location(), &self.remote_file_name())
    }

    /// Relative link destination used inside a release directory
    pub fn release_link_destination(&self) -> String {
        format!("../{}", self.remote_file_name())
    }
}

impl Default for ConfigFileNames {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_EXTENSION)
    }
}

/// Name patterns never mirrored into a release, so synced content cannot
/// clobber live configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncExcludes {
    patterns: Vec<String>,
}

impl SyncExcludes {
    pub fn for_config(names: &ConfigFileNames) -> Self {
        let ext = names.extension();
        let mut patterns: Vec<String> = [
            ".git*",
            "node_modules/",
            ".DS_Store",
            "README.md",
            "environment.json",
            "environment.*.json",
            ".deploy.yml",
            ".deploy.yaml",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        patterns.push(format!("/config.{}", ext));
        patterns.push(format!("config.*.{}", ext));
        patterns.push(format!("deploy-config.{}", ext));
        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for SyncExcludes {
    fn default() -> Self {
        Self::for_config(&ConfigFileNames::default())
    }
}
