//! Deploy file type definitions

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::domain::value_objects::{Supervisor, DEFAULT_CONFIG_EXTENSION};

/// Contents of `.deploy.yml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeployFile {
    /// Release version; the CLI may override it
    #[serde(default, deserialize_with = "version_string")]
    pub version: Option<String>,

    #[serde(default)]
    pub settings: SettingsConfig,

    /// Targets by name, in name order
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

impl DeployFile {
    pub fn target_names(&self) -> Vec<&str> {
        self.targets.keys().map(String::as_str).collect()
    }
}

/// Accepts quoted strings and bare integers (`version: 2`). A bare decimal
/// is rejected: YAML reads `1.10` as the float `1.1`.
fn version_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(u64),
        Float(f64),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Text(s)) => Ok(Some(s)),
        Some(Raw::Int(n)) => Ok(Some(n.to_string())),
        Some(Raw::Float(f)) => Err(D::Error::custom(format!(
            "version must be a quoted string; YAML reads this bare decimal as the number {}",
            f
        ))),
    }
}

/// Project-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SettingsConfig {
    #[serde(default)]
    pub supervisor: Supervisor,

    #[serde(default = "default_config_extension", alias = "configExtension")]
    pub config_extension: String,

    #[serde(default = "default_ssh_command")]
    pub ssh_command: String,

    #[serde(default)]
    pub ssh_options: Vec<String>,

    #[serde(default = "default_rsync_command")]
    pub rsync_command: String,

    #[serde(default)]
    pub install_command: Option<String>,

    /// 0 disables the deadline
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// 0 disables the deadline
    #[serde(default = "default_transfer_timeout_secs")]
    pub transfer_timeout_secs: u64,

    /// Skip confirmation prompts for every run
    #[serde(default)]
    pub silent: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            supervisor: Supervisor::default(),
            config_extension: default_config_extension(),
            ssh_command: default_ssh_command(),
            ssh_options: Vec::new(),
            rsync_command: default_rsync_command(),
            install_command: None,
            command_timeout_secs: default_command_timeout_secs(),
            transfer_timeout_secs: default_transfer_timeout_secs(),
            silent: false,
        }
    }
}

fn default_config_extension() -> String {
    DEFAULT_CONFIG_EXTENSION.to_string()
}

fn default_ssh_command() -> String {
    "ssh".to_string()
}

fn default_rsync_command() -> String {
    "rsync".to_string()
}

fn default_command_timeout_secs() -> u64 {
    300
}

fn default_transfer_timeout_secs() -> u64 {
    1800
}

/// One deployment destination as written in the file (before interpolation)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TargetConfig {
    #[serde(default, alias = "hostConnStr")]
    pub host: String,

    #[serde(default, alias = "appLocation")]
    pub app_location: String,

    #[serde(default, alias = "symlinkLocation")]
    pub symlink_location: String,

    #[serde(default, alias = "upstartName")]
    pub service: String,
}
