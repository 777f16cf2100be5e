//! Remote Command Executor
//!
//! Renders a `Script` (fail-fast by default), runs it through the
//! `RemoteShell` port, and logs failures before propagating them.

use crate::domain::ports::{
    DeployEvent, DeployEventSink, RemoteCommandResult, RemoteError, RemoteShell,
};
use crate::domain::value_objects::{Script, StepControl};

/// Per-call execution options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOptions {
    /// Abort the remote script on the first failing statement (`set -e`)
    pub fail_fast: bool,
    /// Leave failure logging to the caller
    pub suppress_error_logging: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            fail_fast: true,
            suppress_error_logging: false,
        }
    }
}

impl ExecOptions {
    /// Run every statement even if an earlier one fails
    pub fn no_bail() -> Self {
        Self {
            fail_fast: false,
            ..Self::default()
        }
    }

    /// Fail fast, but let the caller decide whether a failure is worth logging
    pub fn quiet() -> Self {
        Self {
            suppress_error_logging: true,
            ..Self::default()
        }
    }
}

/// Executes scripts against one host with one step control.
pub struct RemoteExecutor<'a> {
    shell: &'a dyn RemoteShell,
    host: &'a str,
    events: &'a dyn DeployEventSink,
    control: StepControl,
}

impl<'a> RemoteExecutor<'a> {
    pub fn new(
        shell: &'a dyn RemoteShell,
        host: &'a str,
        events: &'a dyn DeployEventSink,
        control: StepControl,
    ) -> Self {
        Self {
            shell,
            host,
            events,
            control,
        }
    }

    pub fn events(&self) -> &'a dyn DeployEventSink {
        self.events
    }

    /// Run `script` once. No retries.
    pub fn execute(
        &self,
        script: &Script,
        options: ExecOptions,
    ) -> Result<RemoteCommandResult, RemoteError> {
        if self.control.cancel.is_cancelled() {
            return Err(RemoteError::Cancelled);
        }

        let text = script.render(options.fail_fast);
        self.shell
            .execute(self.host, &text, &self.control)
            .inspect_err(|err| {
                if !options.suppress_error_logging {
                    self.log_error(err);
                }
            })
    }

    /// Report a failure the caller decided is fatal
    pub fn log_error(&self, err: &RemoteError) {
        self.events.on_event(DeployEvent::RemoteError {
            message: err.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::deploy_events::testing::RecordingEventSink;
    use crate::domain::value_objects::CancelToken;
    use std::sync::Mutex;

    struct ScriptedShell {
        scripts: Mutex<Vec<String>>,
        fail_with: Option<String>,
    }

    impl ScriptedShell {
        fn ok() -> Self {
            Self {
                scripts: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(stderr: &str) -> Self {
            Self {
                scripts: Mutex::new(Vec::new()),
                fail_with: Some(stderr.to_string()),
            }
        }
    }

    impl RemoteShell for ScriptedShell {
        fn execute(
            &self,
            _host: &str,
            script: &str,
            _control: &StepControl,
        ) -> Result<RemoteCommandResult, RemoteError> {
            self.scripts.lock().unwrap().push(script.to_string());
            match &self.fail_with {
                Some(stderr) => Err(RemoteError::Failed {
                    status: Some(1),
                    stdout: String::new(),
                    stderr: stderr.clone(),
                }),
                None => Ok(RemoteCommandResult::ok("")),
            }
        }
    }

    #[test]
    fn default_is_fail_fast() {
        let shell = ScriptedShell::ok();
        let sink = RecordingEventSink::new();
        let exec = RemoteExecutor::new(&shell, "h", &sink, StepControl::unbounded());

        exec.execute(&Script::line("mkdir -p \"/a\""), ExecOptions::default())
            .unwrap();

        assert_eq!(
            shell.scripts.lock().unwrap().as_slice(),
            &["set -e\nmkdir -p \"/a\"".to_string()]
        );
    }

    #[test]
    fn no_bail_omits_set_e() {
        let shell = ScriptedShell::ok();
        let sink = RecordingEventSink::new();
        let exec = RemoteExecutor::new(&shell, "h", &sink, StepControl::unbounded());

        exec.execute(&Script::line("a").then("b"), ExecOptions::no_bail())
            .unwrap();

        assert_eq!(shell.scripts.lock().unwrap()[0], "a\nb");
    }

    #[test]
    fn failure_is_logged_unless_suppressed() {
        let shell = ScriptedShell::failing("boom");
        let sink = RecordingEventSink::new();
        let exec = RemoteExecutor::new(&shell, "h", &sink, StepControl::unbounded());

        assert!(exec.execute(&Script::line("x"), ExecOptions::default()).is_err());
        assert_eq!(sink.events().len(), 1);

        assert!(exec.execute(&Script::line("x"), ExecOptions::quiet()).is_err());
        assert_eq!(sink.events().len(), 1);
    }

    #[test]
    fn cancelled_token_skips_the_round_trip() {
        let shell = ScriptedShell::ok();
        let sink = RecordingEventSink::new();
        let cancel = CancelToken::new();
        cancel.cancel();
        let exec = RemoteExecutor::new(&shell, "h", &sink, StepControl::new(None, cancel));

        let err = exec
            .execute(&Script::line("x"), ExecOptions::default())
            .unwrap_err();

        assert_eq!(err, RemoteError::Cancelled);
        assert!(shell.scripts.lock().unwrap().is_empty());
    }
}
