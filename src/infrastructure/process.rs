//! Subprocess Runner
//!
//! Runs one external command to completion while honoring a `StepControl`:
//! the child is polled, and killed once its deadline passes or the run is
//! cancelled. Output is drained on reader threads so a chatty child cannot
//! block on a full pipe.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::domain::ports::{RemoteError, TransferError};
use crate::domain::value_objects::StepControl;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when terminated by a signal
    pub status: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error("failed to start {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("lost track of child process: {0}")]
    Wait(String),

    #[error("timed out after {}s", .after.as_secs())]
    TimedOut { after: Duration },

    #[error("cancelled")]
    Cancelled,
}

impl From<ProcessError> for RemoteError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::TimedOut { after } => RemoteError::TimedOut { after },
            ProcessError::Cancelled => RemoteError::Cancelled,
            other => RemoteError::Spawn(other.to_string()),
        }
    }
}

impl From<ProcessError> for TransferError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::TimedOut { after } => TransferError::TimedOut { after },
            ProcessError::Cancelled => TransferError::Cancelled,
            other => TransferError::Spawn(other.to_string()),
        }
    }
}

/// Run `command` with stdin closed and stdout/stderr captured.
pub fn run(mut command: Command, control: &StepControl) -> Result<ProcessOutput, ProcessError> {
    let program = command.get_program().to_string_lossy().into_owned();
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ProcessError::Spawn {
            program,
            message: e.to_string(),
        })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = wait(&mut child, control)?;

    Ok(ProcessOutput {
        stdout: collect(stdout),
        stderr: collect(stderr),
        status: status.code(),
    })
}

fn wait(child: &mut Child, control: &StepControl) -> Result<ExitStatus, ProcessError> {
    let started = Instant::now();
    loop {
        if let Some(status) = child
            .try_wait()
            .map_err(|e| ProcessError::Wait(e.to_string()))?
        {
            return settle(status, control);
        }

        if control.cancel.is_cancelled() {
            kill(child);
            return Err(ProcessError::Cancelled);
        }

        if let Some(after) = control.timeout {
            if started.elapsed() >= after {
                kill(child);
                return Err(ProcessError::TimedOut { after });
            }
        }

        thread::sleep(POLL_INTERVAL);
    }
}

/// A terminal Ctrl+C reaches the child's process group as well, so the child
/// can die before the token is polled. A failed exit after cancellation is the
/// cancellation, not a failure of the command.
fn settle(status: ExitStatus, control: &StepControl) -> Result<ExitStatus, ProcessError> {
    if !status.success() && control.cancel.is_cancelled() {
        return Err(ProcessError::Cancelled);
    }
    Ok(status)
}

fn kill(child: &mut Child) {
    // Already-exited children make kill fail; reaping still matters.
    let _ = child.kill();
    let _ = child.wait();
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn collect(handle: JoinHandle<Vec<u8>>) -> String {
    let bytes = handle.join().unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
