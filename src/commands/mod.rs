//! Command implementations for the `cutover` binary

pub mod config;
pub mod deploy;
pub mod targets;

use std::path::PathBuf;

use anyhow::Result;
use cutover::config::{
    discover, load_with_warnings, with_env_overrides, DeployFile, ResolveOptions,
};
use cutover::domain::value_objects::CancelToken;
use cutover::presentation::factory::{self, ConcreteDeployUseCase};
use cutover::ui::output::print_config_warnings;
use cutover::ui::UiContext;

/// Inputs shared by every command
pub struct CommandContext {
    pub ui: UiContext,
    pub config: Option<PathBuf>,
    pub cancel: CancelToken,
}

/// Deploy file after discovery, warnings and env overrides
pub struct LoadedConfig {
    pub path: PathBuf,
    pub file: DeployFile,
    /// Directory local sources and config files resolve against
    pub local_root: PathBuf,
}

impl CommandContext {
    pub fn load_config(&self) -> Result<LoadedConfig> {
        let cwd = std::env::current_dir()?;
        let path = discover(self.config.as_deref(), &cwd)?;
        let (file, warnings) = load_with_warnings(&path)?;
        print_config_warnings(&self.ui, &warnings);
        let file = with_env_overrides(file)?;

        Ok(LoadedConfig {
            path,
            file,
            local_root: cwd,
        })
    }

    /// Resolve `target` and wire a use case for it
    pub fn use_case(
        &self,
        target: &str,
        options: &ResolveOptions,
    ) -> Result<ConcreteDeployUseCase> {
        let loaded = self.load_config()?;
        let resolved = loaded.file.resolve(target, &loaded.local_root, options)?;
        Ok(factory::create_deploy_use_case(
            resolved,
            factory::create_event_sink(&self.ui),
            self.cancel.clone(),
        ))
    }
}
