//! Resolution of a named target into the values a pipeline runs with
//!
//! Interpolation and validation happen here, once; the resulting
//! `DeploymentTarget` is read-only for the rest of the run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::PipelineSettings;
use crate::domain::value_objects::{ConfigFileNames, DeploymentTarget};
use crate::error::ConfigError;

use super::interpolate::interpolate;
use super::types::{DeployFile, SettingsConfig, TargetConfig};

/// Version used when neither the CLI nor the file names one
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Per-invocation inputs to resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub release_version: Option<String>,
    pub version_suffix: Option<String>,
    pub silent: bool,
}

/// How the local `ssh` and `rsync` clients are invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub ssh_command: String,
    pub ssh_options: Vec<String>,
    pub rsync_command: String,
}

#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub target: DeploymentTarget,
    pub settings: PipelineSettings,
    pub transport: TransportSettings,
}

impl DeployFile {
    /// Resolve `name` using the process environment for interpolation.
    pub fn resolve(
        &self,
        name: &str,
        local_root: &Path,
        options: &ResolveOptions,
    ) -> Result<ResolvedTarget, ConfigError> {
        self.resolve_with_env(name, local_root, options, |key| std::env::var(key).ok())
    }

    pub(crate) fn resolve_with_env(
        &self,
        name: &str,
        local_root: &Path,
        options: &ResolveOptions,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolvedTarget, ConfigError> {
        let raw = self
            .targets
            .get(name)
            .ok_or_else(|| ConfigError::UnknownTarget {
                name: name.to_string(),
                available: available_names(self),
            })?;

        let field = |field: &'static str, value: &str| {
            interpolate(value, &get_env).map_err(|e| ConfigError::Interpolation {
                target: name.to_string(),
                field,
                message: e.to_string(),
            })
        };

        let resolved = TargetConfig {
            host: field("host", &raw.host)?,
            app_location: field("app_location", &raw.app_location)?,
            symlink_location: field("symlink_location", &raw.symlink_location)?,
            service: field("service", &raw.service)?,
        };
        validate(name, &resolved)?;

        let target = DeploymentTarget::new(
            name,
            resolved.host,
            trim_trailing_slash(&resolved.app_location),
            trim_trailing_slash(&resolved.symlink_location),
            resolved.service,
        )
        .with_version(self.release_version(options))
        .with_silent(options.silent || self.settings.silent);

        Ok(ResolvedTarget {
            target,
            settings: pipeline_settings(&self.settings, local_root),
            transport: TransportSettings {
                ssh_command: self.settings.ssh_command.clone(),
                ssh_options: self.settings.ssh_options.clone(),
                rsync_command: self.settings.rsync_command.clone(),
            },
        })
    }

    /// CLI version, else file version, else `0.0.0`; suffix appended
    pub fn release_version(&self, options: &ResolveOptions) -> String {
        let base = options
            .release_version
            .as_deref()
            .or(self.version.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VERSION);

        match options.version_suffix.as_deref() {
            Some(suffix) if !suffix.is_empty() => format!("{}{}", base, suffix),
            _ => base.to_string(),
        }
    }
}

fn available_names(file: &DeployFile) -> String {
    let names = file.target_names();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

fn validate(name: &str, target: &TargetConfig) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::Invalid {
        target: name.to_string(),
        message,
    };

    if target.host.trim().is_empty() {
        return Err(invalid("host is required".to_string()));
    }
    if target.service.trim().is_empty() {
        return Err(invalid("service is required".to_string()));
    }
    for (key, value) in [
        ("app_location", &target.app_location),
        ("symlink_location", &target.symlink_location),
    ] {
        if !value.starts_with('/') {
            return Err(invalid(format!(
                "{} must be an absolute path, got '{}'",
                key, value
            )));
        }
        if trim_trailing_slash(value) == "/" {
            return Err(invalid(format!("{} must not be the filesystem root", key)));
        }
    }
    Ok(())
}

fn trim_trailing_slash(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn pipeline_settings(settings: &SettingsConfig, local_root: &Path) -> PipelineSettings {
    PipelineSettings {
        supervisor: settings.supervisor,
        config_files: ConfigFileNames::new(settings.config_extension.as_str()),
        install_command: settings
            .install_command
            .clone()
            .filter(|c| !c.trim().is_empty()),
        command_timeout: seconds(settings.command_timeout_secs),
        transfer_timeout: seconds(settings.transfer_timeout_secs),
        local_root: if local_root.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            local_root.to_path_buf()
        },
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
