//! Service Lifecycle Manager
//!
//! Start/stop/restart of one supervised remote service, observed only
//! through command exit status and stderr.
//!
//! ```text
//! Running ──stop──▶ Stopped | Unknown ──start──▶ Running | Unknown
//! ```

use crate::domain::ports::{DeployEvent, RemoteError, ServiceAction};
use crate::domain::services::{classify_service_error, ToleratedOutcome, ToleratedReason};
use crate::domain::value_objects::{Script, Supervisor};

use super::executor::{ExecOptions, RemoteExecutor};

/// Result of a stop/start that did not fail fatally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOutcome {
    Done,
    Tolerated(ToleratedReason),
}

impl ServiceOutcome {
    pub fn tolerated_reason(self) -> Option<ToleratedReason> {
        match self {
            Self::Done => None,
            Self::Tolerated(reason) => Some(reason),
        }
    }
}

pub struct ServiceLifecycle<'a> {
    exec: &'a RemoteExecutor<'a>,
    supervisor: Supervisor,
}

impl<'a> ServiceLifecycle<'a> {
    pub fn new(exec: &'a RemoteExecutor<'a>, supervisor: Supervisor) -> Self {
        Self { exec, supervisor }
    }

    /// Stop the service. "Not running" and "not registered" are tolerated.
    pub fn stop(&self, service: &str) -> Result<ServiceOutcome, RemoteError> {
        self.run(
            ServiceAction::Stop,
            service,
            self.supervisor.stop_command(service),
            |_| true,
        )
    }

    /// Start the service. Only "not registered" is tolerated.
    pub fn start(&self, service: &str) -> Result<ServiceOutcome, RemoteError> {
        self.run(
            ServiceAction::Start,
            service,
            self.supervisor.start_command(service),
            |reason| reason == ToleratedReason::NotRegistered,
        )
    }

    /// Stop then start as one non-bailing script; both statements always run.
    pub fn restart(&self, service: &str) -> Result<(), RemoteError> {
        let script = Script::line(self.supervisor.stop_command(service))
            .then(self.supervisor.start_command(service));
        self.exec.execute(&script, ExecOptions::no_bail())?;
        Ok(())
    }

    fn run(
        &self,
        action: ServiceAction,
        service: &str,
        command: String,
        tolerates: impl Fn(ToleratedReason) -> bool,
    ) -> Result<ServiceOutcome, RemoteError> {
        let err = match self.exec.execute(&Script::line(command), ExecOptions::quiet()) {
            Ok(_) => return Ok(ServiceOutcome::Done),
            Err(err) => err,
        };

        if let RemoteError::Failed { stderr, .. } = &err {
            if let ToleratedOutcome::Tolerated(reason) = classify_service_error(stderr) {
                if tolerates(reason) {
                    self.exec.events().on_event(DeployEvent::ServiceTolerated {
                        service: service.to_string(),
                        action,
                        reason,
                    });
                    return Ok(ServiceOutcome::Tolerated(reason));
                }
            }
        }

        self.exec.log_error(&err);
        Err(err)
    }
}
