//! Deploy Use Case
//!
//! Orchestrates the three pipelines:
//! - `deploy`: confirm, stop, retire `cur` into `prev`, sync a fresh `cur`,
//!   link config, install dependencies, cut the live symlink over, start
//! - `push_config`: confirm, push the local config file, restart
//! - `pull_config`: fetch the live config file
//!
//! Every step is one remote round trip; any failure aborts the remaining
//! steps. Nothing already done is rolled back.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::application::confirm::ConfirmationGate;
use crate::application::executor::RemoteExecutor;
use crate::application::install::install_dependencies;
use crate::application::remote_fs::{MoveOutcome, RemoteFilesystem};
use crate::application::service::ServiceLifecycle;
use crate::domain::ports::{
    ContentTransfer, DeployEvent, DeployEventSink, NoopEventSink, Pipeline, Prompter,
    RemoteShell, ServiceAction, Step,
};
use crate::domain::value_objects::{join_remote, CancelToken, DeploymentTarget};
use crate::error::{CutoverResult, DeployError};

use super::context::RunContext;
use super::options::{DeployOptions, PipelineSettings};
use super::result::DeployReport;

/// Deploy use case, parameterized by its ports.
pub struct DeployUseCase<S, T, P>
where
    S: RemoteShell,
    T: ContentTransfer,
    P: Prompter,
{
    target: DeploymentTarget,
    settings: PipelineSettings,
    shell: S,
    transfer: T,
    prompter: P,
    events: Arc<dyn DeployEventSink>,
    cancel: CancelToken,
}

impl<S, T, P> DeployUseCase<S, T, P>
where
    S: RemoteShell,
    T: ContentTransfer,
    P: Prompter,
{
    pub fn new(
        target: DeploymentTarget,
        settings: PipelineSettings,
        shell: S,
        transfer: T,
        prompter: P,
    ) -> Self {
        Self {
            target,
            settings,
            shell,
            transfer,
            prompter,
            events: Arc::new(NoopEventSink),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Token checked between steps and handed to every subprocess
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn target(&self) -> &DeploymentTarget {
        &self.target
    }

    /// Stage, sync and cut over a new release.
    pub fn deploy(&self, options: &DeployOptions) -> CutoverResult<DeployReport> {
        self.run_pipeline(Pipeline::Deploy, |ctx| self.run_deploy(ctx, options))
    }

    /// Overwrite the remote config file with the local one, then restart.
    pub fn push_config(&self) -> CutoverResult<()> {
        self.run_pipeline(Pipeline::PushConfig, |ctx| self.run_push_config(ctx))
    }

    /// Fetch the remote config file; returns the local path written.
    pub fn pull_config(&self) -> CutoverResult<PathBuf> {
        self.run_pipeline(Pipeline::PullConfig, |ctx| self.run_pull_config(ctx))
    }

    fn run_pipeline<R>(
        &self,
        pipeline: Pipeline,
        body: impl FnOnce(RunContext) -> CutoverResult<R>,
    ) -> CutoverResult<R> {
        let started = Instant::now();
        self.emit(DeployEvent::Started {
            pipeline,
            target: self.target.name().to_string(),
            host: self.target.host().to_string(),
            version: self.target.version().to_string(),
        });

        let ctx = RunContext::new(self.target.is_silent(), self.cancel.clone());
        let result = body(ctx);

        match &result {
            Ok(_) => self.emit(DeployEvent::Completed {
                pipeline,
                elapsed_ms: started.elapsed().as_millis(),
            }),
            Err(DeployError::UserDeclined) => self.emit(DeployEvent::Declined { pipeline }),
            Err(err) => self.emit(DeployEvent::Failed {
                pipeline,
                error: err.to_string(),
            }),
        }
        result
    }

    fn run_deploy(&self, ctx: RunContext, options: &DeployOptions) -> CutoverResult<DeployReport> {
        let target = &self.target;
        let events = self.events.as_ref();

        ConfirmationGate::new(&self.prompter, events).confirm(
            &format!(
                "Are you sure you want to deploy the application to {}?",
                target.name()
            ),
            false,
            ctx.is_silent(),
        )?;
        // One approval covers the rest of the run.
        let ctx = ctx.approved();

        let layout = target.layout();
        let exec = RemoteExecutor::new(
            &self.shell,
            target.host(),
            events,
            ctx.control(self.settings.command_timeout),
        );
        let fs = RemoteFilesystem::new(&exec);
        let services = ServiceLifecycle::new(&exec, self.settings.supervisor);
        let mut report = DeployReport::new(target.version(), &layout.current);

        if options.manage_service {
            self.begin(&ctx, Step::StopService, target.service())?;
            // A tolerated condition is the step's outcome in place of Done
            match services.stop(target.service())?.tolerated_reason() {
                Some(reason) => report.tolerated.push((ServiceAction::Stop, reason)),
                None => self.done(Step::StopService),
            }
        }

        self.begin(&ctx, Step::RemovePrevious, &layout.previous)?;
        fs.remove_directory(&layout.previous)?;
        self.done(Step::RemovePrevious);

        self.begin(
            &ctx,
            Step::RetireCurrent,
            &format!("{} -> {}", layout.current, layout.previous),
        )?;
        match fs.move_path(&layout.current, &layout.previous)? {
            MoveOutcome::Moved => {
                report.retired_previous = true;
                self.done(Step::RetireCurrent);
            }
            MoveOutcome::SourceMissing => {
                self.skipped(Step::RetireCurrent, "no current release to retire")
            }
        }

        self.begin(&ctx, Step::CreateCurrent, &layout.current)?;
        fs.ensure_directory(&layout.current)?;
        self.done(Step::CreateCurrent);

        let src = self.settings.local_root.join(&options.src);
        self.begin(
            &ctx,
            Step::SyncRelease,
            &format!("{} -> {}", src.display(), layout.current),
        )?;
        let output = self.transfer.sync_directory(
            &src,
            target.host(),
            &layout.current,
            &ctx.control(self.settings.transfer_timeout),
        )?;
        self.output(Step::SyncRelease, output.stdout);
        self.done(Step::SyncRelease);

        if options.symlink_config_file {
            let names = &self.settings.config_files;
            let link = join_remote(&layout.current, &names.remote_file_name());
            let dest = names.release_link_destination();
            self.begin(&ctx, Step::LinkConfig, &format!("{} -> {}", link, dest))?;
            fs.symlink(&link, &dest)?;
            self.done(Step::LinkConfig);
        }

        if options.install_dependencies {
            self.begin(&ctx, Step::InstallDependencies, &layout.current)?;
            let install = install_dependencies(
                &exec,
                &layout.current,
                self.settings.install_command.as_deref(),
            )?;
            self.output(Step::InstallDependencies, install.stdout.clone());
            self.emit(DeployEvent::DependenciesInstalled {
                node_version: install.node_version.clone(),
                npm_version: install.npm_version.clone(),
                nvm_invoked: install.nvm_invoked,
            });
            report.install = Some(install);
            self.done(Step::InstallDependencies);
        }

        self.begin(
            &ctx,
            Step::Cutover,
            &format!("{} -> {}", layout.symlink_target, layout.current),
        )?;
        fs.symlink(&layout.symlink_target, &layout.current)?;
        self.done(Step::Cutover);

        if options.manage_service {
            self.begin(&ctx, Step::StartService, target.service())?;
            match services.start(target.service())?.tolerated_reason() {
                Some(reason) => report.tolerated.push((ServiceAction::Start, reason)),
                None => self.done(Step::StartService),
            }
        }

        Ok(report)
    }

    fn run_push_config(&self, ctx: RunContext) -> CutoverResult<()> {
        let target = &self.target;
        let events = self.events.as_ref();
        let local = self.local_config_path();
        if !local.is_file() {
            return Err(DeployError::ConfigurationMissing { path: local });
        }

        ConfirmationGate::new(&self.prompter, events).confirm(
            &format!(
                "Are you sure you want to push and overwrite the {} config file?",
                target.name()
            ),
            false,
            ctx.is_silent(),
        )?;
        let ctx = ctx.approved();

        let remote = self.settings.config_files.remote_path(target);
        self.begin(
            &ctx,
            Step::PushConfig,
            &format!("{} -> {}", local.display(), remote),
        )?;
        let output = self.transfer.push_file(
            &local,
            target.host(),
            &remote,
            &ctx.control(self.settings.transfer_timeout),
        )?;
        self.output(Step::PushConfig, output.stdout);
        self.done(Step::PushConfig);

        let exec = RemoteExecutor::new(
            &self.shell,
            target.host(),
            events,
            ctx.control(self.settings.command_timeout),
        );
        self.begin(&ctx, Step::RestartService, target.service())?;
        ServiceLifecycle::new(&exec, self.settings.supervisor).restart(target.service())?;
        self.done(Step::RestartService);

        Ok(())
    }

    fn run_pull_config(&self, ctx: RunContext) -> CutoverResult<PathBuf> {
        let target = &self.target;
        let local = self.local_config_path();
        let remote = self.settings.config_files.remote_path(target);

        self.begin(
            &ctx,
            Step::PullConfig,
            &format!("{} -> {}", remote, local.display()),
        )?;
        let output = self.transfer.pull_file(
            target.host(),
            &remote,
            &local,
            &ctx.control(self.settings.transfer_timeout),
        )?;
        self.output(Step::PullConfig, output.stdout);
        self.done(Step::PullConfig);

        Ok(local)
    }

    fn local_config_path(&self) -> PathBuf {
        self.settings
            .config_files
            .local_path(&self.settings.local_root, &self.target)
    }

    fn begin(&self, ctx: &RunContext, step: Step, detail: &str) -> CutoverResult<()> {
        ctx.check_cancelled()?;
        self.emit(DeployEvent::StepStarted {
            step,
            detail: detail.to_string(),
        });
        Ok(())
    }

    fn done(&self, step: Step) {
        self.emit(DeployEvent::StepDone { step });
    }

    fn skipped(&self, step: Step, reason: &str) {
        self.emit(DeployEvent::StepSkipped {
            step,
            reason: reason.to_string(),
        });
    }

    fn output(&self, step: Step, output: String) {
        if !output.trim().is_empty() {
            self.emit(DeployEvent::RemoteOutput { step, output });
        }
    }

    fn emit(&self, event: DeployEvent) {
        self.events.on_event(event);
    }
}
