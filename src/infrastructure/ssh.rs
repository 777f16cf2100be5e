//! SSH Remote Shell
//!
//! Implements the `RemoteShell` port by handing the whole script to
//! `ssh <options> <host> <script>` as a single argument.

use std::process::Command;

use crate::domain::ports::{RemoteCommandResult, RemoteError, RemoteShell};
use crate::domain::value_objects::StepControl;

use super::process;

pub struct SshShell {
    program: String,
    options: Vec<String>,
}

impl SshShell {
    pub fn new() -> Self {
        Self {
            program: "ssh".to_string(),
            options: Vec::new(),
        }
    }

    /// Use another ssh-compatible executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Extra arguments placed before the host (e.g. `-p 2222`)
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    fn command(&self, host: &str, script: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.options).arg(host).arg(script);
        cmd
    }
}

impl Default for SshShell {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteShell for SshShell {
    fn execute(
        &self,
        host: &str,
        script: &str,
        control: &StepControl,
    ) -> Result<RemoteCommandResult, RemoteError> {
        let output = process::run(self.command(host, script), control)?;
        if output.success() {
            Ok(RemoteCommandResult {
                stdout: output.stdout,
                stderr: output.stderr,
                status: output.status,
            })
        } else {
            Err(RemoteError::Failed {
                status: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
            })
        }
    }
}
