//! Console Event Sink
//!
//! Human-readable pipeline progress: one line per step start, an indented
//! outcome line per step, colored when the terminal allows it.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{DeployEvent, DeployEventSink, Pipeline, Step};
use crate::domain::services::ToleratedReason;
use crate::ui::theme::Icons;
use crate::ui::{ColoredText, UiContext};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
    verbose: bool,
    icons: Icons,
}

impl ConsoleEventSink {
    /// Sink writing to stdout with the run's UI decisions
    pub fn stdout(ui: &UiContext) -> Self {
        Self::with_writer(io::stdout(), ui)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, ui: &UiContext) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            color: ui.color,
            verbose: ui.verbose > 0,
            icons: Icons::new(ui.unicode),
        }
    }

    fn paint(&self, text: ColoredText) -> String {
        text.render(self.color)
    }

    fn write_line(&self, line: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }

    fn render(&self, event: DeployEvent) -> Vec<String> {
        let icons = &self.icons;
        match event {
            DeployEvent::Started {
                pipeline,
                target,
                host,
                version,
            } => {
                let headline = match pipeline {
                    Pipeline::Deploy => format!(
                        "{} Deploying version {} to {} ({})",
                        icons.deploy, version, target, host
                    ),
                    Pipeline::PushConfig => {
                        format!("{} Pushing config to {} ({})", icons.remote, target, host)
                    }
                    Pipeline::PullConfig => {
                        format!("{} Pulling config from {} ({})", icons.remote, target, host)
                    }
                };
                vec![self.paint(ColoredText::dim(headline).bold())]
            }

            DeployEvent::StepStarted { step, detail } => {
                let detail = if is_service_step(step) {
                    self.paint(ColoredText::service(detail))
                } else {
                    self.paint(ColoredText::path(detail))
                };
                vec![format!("{} {}...", step_label(step), detail)]
            }

            DeployEvent::StepDone { .. } => {
                vec![format!(
                    "  {}",
                    self.paint(ColoredText::success(format!("{} Done", icons.success)))
                )]
            }

            DeployEvent::StepSkipped { reason, .. } => {
                vec![format!(
                    "  {}",
                    self.paint(ColoredText::dim(format!("{} Skipped: {}", icons.skipped, reason)))
                )]
            }

            DeployEvent::PromptSkipped { message } => {
                vec![self.paint(ColoredText::dim(format!(
                    "Silent mode, skipping prompt: {}",
                    message
                )))]
            }

            DeployEvent::ServiceTolerated {
                service,
                action,
                reason,
            } => {
                let text = format!(
                    "{} {}; {} skipped",
                    self.paint(ColoredText::service(service)),
                    reason,
                    action.as_str()
                );
                match reason {
                    ToleratedReason::NotRegistered => vec![format!(
                        "  {} {}",
                        self.paint(ColoredText::warning(icons.warning)),
                        text
                    )],
                    ToleratedReason::NotRunning => vec![format!("  {} {}", icons.arrow, text)],
                }
            }

            DeployEvent::RemoteError { message } => {
                vec![format!(
                    "  {}",
                    self.paint(ColoredText::error(format!("{} {}", icons.error, message)))
                )]
            }

            DeployEvent::RemoteOutput { output, .. } => {
                if !self.verbose {
                    return Vec::new();
                }
                output
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(|l| format!("    {}", self.paint(ColoredText::dim(l))))
                    .collect()
            }

            DeployEvent::DependenciesInstalled {
                node_version,
                npm_version,
                nvm_invoked,
            } => {
                let mut lines = Vec::new();
                if nvm_invoked {
                    lines.push(format!("  {} NVM install invoked", icons.arrow));
                }
                if let Some(v) = node_version {
                    lines.push(format!("  {} Node version: {}", icons.arrow, v));
                }
                if let Some(v) = npm_version {
                    lines.push(format!("  {} NPM version: {}", icons.arrow, v));
                }
                lines
            }

            DeployEvent::Declined { .. } => vec!["Aborted.".to_string()],

            DeployEvent::Completed {
                pipeline,
                elapsed_ms,
            } => vec![self.paint(
                ColoredText::success(format!(
                    "{} {} complete ({:.1}s)",
                    icons.success,
                    pipeline.label(),
                    elapsed_ms as f64 / 1000.0
                ))
                .bold(),
            )],

            DeployEvent::Failed { pipeline, error } => vec![self.paint(
                ColoredText::error(format!("{} {} failed: {}", icons.error, pipeline.label(), error))
                    .bold(),
            )],
        }
    }
}

fn is_service_step(step: Step) -> bool {
    matches!(
        step,
        Step::StopService | Step::StartService | Step::RestartService
    )
}

fn step_label(step: Step) -> &'static str {
    match step {
        Step::StopService => "Stopping service",
        Step::RemovePrevious => "Removing previous release",
        Step::RetireCurrent => "Retiring current release",
        Step::CreateCurrent => "Creating release directory",
        Step::SyncRelease => "Syncing release",
        Step::LinkConfig => "Linking config",
        Step::InstallDependencies => "Installing dependencies in",
        Step::Cutover => "Cutting over",
        Step::StartService => "Starting service",
        Step::PushConfig => "Pushing config",
        Step::PullConfig => "Pulling config",
        Step::RestartService => "Restarting service",
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        for line in self.render(event) {
            self.write_line(line);
        }
    }
}
