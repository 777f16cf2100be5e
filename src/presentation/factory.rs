//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::DeployUseCase;
use crate::config::ResolvedTarget;
use crate::domain::ports::DeployEventSink;
use crate::domain::value_objects::{CancelToken, SyncExcludes};
use crate::infrastructure::{
    ConsoleEventSink, DialoguerPrompter, JsonEventSink, RsyncTransfer, SshShell,
};
use crate::ui::UiContext;

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<SshShell, RsyncTransfer, DialoguerPrompter>;

/// Create a deploy use case for a resolved target
///
/// The transfer's exclusion list is fixed here from the target's config file
/// naming and stays the same for the whole run.
pub fn create_deploy_use_case(
    resolved: ResolvedTarget,
    events: Arc<dyn DeployEventSink>,
    cancel: CancelToken,
) -> ConcreteDeployUseCase {
    let ResolvedTarget {
        target,
        settings,
        transport,
    } = resolved;

    let shell = SshShell::new()
        .with_program(transport.ssh_command.as_str())
        .with_options(transport.ssh_options.clone());

    let transfer = RsyncTransfer::new(SyncExcludes::for_config(&settings.config_files))
        .with_program(transport.rsync_command)
        .with_ssh(transport.ssh_command, transport.ssh_options);

    DeployUseCase::new(target, settings, shell, transfer, DialoguerPrompter::new())
        .with_events(events)
        .with_cancel_token(cancel)
}

/// Event sink matching the run's output mode
pub fn create_event_sink(ui: &UiContext) -> Arc<dyn DeployEventSink> {
    if ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(ui))
    }
}
