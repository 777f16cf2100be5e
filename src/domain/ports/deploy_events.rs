//! Deploy Event Port
//!
//! Provides an observable interface for deploy pipelines.
//! Enables console progress, JSON event streams, and test assertions.

use std::fmt;

use crate::domain::services::ToleratedReason;

/// The three pipelines the orchestrator runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Deploy,
    PushConfig,
    PullConfig,
}

impl Pipeline {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deploy => "deploy",
            Self::PushConfig => "push_config",
            Self::PullConfig => "pull_config",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Deploy => "Deployment",
            Self::PushConfig => "Config push",
            Self::PullConfig => "Config pull",
        }
    }
}

/// A single step of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    StopService,
    RemovePrevious,
    RetireCurrent,
    CreateCurrent,
    SyncRelease,
    LinkConfig,
    InstallDependencies,
    Cutover,
    StartService,
    PushConfig,
    PullConfig,
    RestartService,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StopService => "stop_service",
            Self::RemovePrevious => "remove_previous",
            Self::RetireCurrent => "retire_current",
            Self::CreateCurrent => "create_current",
            Self::SyncRelease => "sync_release",
            Self::LinkConfig => "link_config",
            Self::InstallDependencies => "install_dependencies",
            Self::Cutover => "cutover",
            Self::StartService => "start_service",
            Self::PushConfig => "push_config",
            Self::PullConfig => "pull_config",
            Self::RestartService => "restart_service",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supervisor action a tolerated condition was observed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Stop,
    Start,
}

impl ServiceAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Start => "start",
        }
    }
}

/// Event emitted during a pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Pipeline started
    Started {
        pipeline: Pipeline,
        target: String,
        host: String,
        version: String,
    },

    /// Step began; `detail` is the human description (paths, service name)
    StepStarted { step: Step, detail: String },

    /// Step finished
    StepDone { step: Step },

    /// Step ran but had nothing to do
    StepSkipped { step: Step, reason: String },

    /// Confirmation was not asked because the run is silent
    PromptSkipped { message: String },

    /// A supervisor failure was recognized as non-fatal
    ServiceTolerated {
        service: String,
        action: ServiceAction,
        reason: ToleratedReason,
    },

    /// A remote command failed (logged before propagation)
    RemoteError { message: String },

    /// Captured remote stdout, shown in verbose mode
    RemoteOutput { step: Step, output: String },

    /// Dependency installation reported tool versions
    DependenciesInstalled {
        node_version: Option<String>,
        npm_version: Option<String>,
        nvm_invoked: bool,
    },

    /// User answered no at the confirmation gate
    Declined { pipeline: Pipeline },

    /// Pipeline completed
    Completed { pipeline: Pipeline, elapsed_ms: u128 },

    /// Pipeline aborted
    Failed { pipeline: Pipeline, error: String },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}
