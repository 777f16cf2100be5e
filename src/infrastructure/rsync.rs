//! Rsync Content Transfer
//!
//! Implements the `ContentTransfer` port with the external `rsync` tool over
//! ssh. Directory syncs mirror with delete-extraneous semantics and the
//! fixed exclusion list; single-file pushes and pulls use neither.

use std::path::Path;
use std::process::Command;

use crate::domain::ports::{ContentTransfer, TransferError, TransferOutput};
use crate::domain::value_objects::{StepControl, SyncExcludes};

use super::process;

pub struct RsyncTransfer {
    program: String,
    ssh_program: String,
    ssh_options: Vec<String>,
    excludes: SyncExcludes,
}

impl RsyncTransfer {
    pub fn new(excludes: SyncExcludes) -> Self {
        Self {
            program: "rsync".to_string(),
            ssh_program: "ssh".to_string(),
            ssh_options: Vec::new(),
            excludes,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Remote shell rsync should tunnel through (`-e`)
    pub fn with_ssh(mut self, program: impl Into<String>, options: Vec<String>) -> Self {
        self.ssh_program = program.into();
        self.ssh_options = options;
        self
    }

    fn remote_shell(&self) -> String {
        std::iter::once(self.ssh_program.as_str())
            .chain(self.ssh_options.iter().map(String::as_str))
            .map(shell_word)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn sync_args(&self, local_src: &Path, host: &str, remote_dir: &str) -> Vec<String> {
        let mut args = vec![
            "-e".to_string(),
            self.remote_shell(),
            "--recursive".to_string(),
            "--delete".to_string(),
            "--verbose".to_string(),
        ];
        args.extend(
            self.excludes
                .patterns()
                .iter()
                .map(|p| format!("--exclude={}", p)),
        );
        args.push(source_arg(local_src));
        args.push(format!("{}:{}", host, remote_dir));
        args
    }

    fn file_args(&self, from: String, to: String) -> Vec<String> {
        vec![
            "-e".to_string(),
            self.remote_shell(),
            "--verbose".to_string(),
            from,
            to,
        ]
    }

    fn run(&self, args: Vec<String>, control: &StepControl) -> Result<TransferOutput, TransferError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        let output = process::run(cmd, control)?;
        if output.success() {
            Ok(TransferOutput {
                stdout: output.stdout,
            })
        } else {
            Err(TransferError::Failed {
                status: output.status,
                stderr: output.stderr,
            })
        }
    }
}

/// One word of rsync's `-e` command. rsync splits that string itself: quotes
/// group words, a doubled quote inside quotes is literal, backslashes are not
/// special.
fn shell_word(word: &str) -> String {
    let plain = !word.is_empty()
        && !word
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '"');
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "''"))
    }
}

/// A directory source gets a trailing `/` so its contents, not the
/// directory itself, land in the destination.
fn source_arg(local_src: &Path) -> String {
    let src = local_src.to_string_lossy().into_owned();
    if local_src.is_dir() && !src.ends_with('/') {
        format!("{}/", src)
    } else {
        src
    }
}

impl ContentTransfer for RsyncTransfer {
    fn sync_directory(
        &self,
        local_src: &Path,
        host: &str,
        remote_dir: &str,
        control: &StepControl,
    ) -> Result<TransferOutput, TransferError> {
        self.run(self.sync_args(local_src, host, remote_dir), control)
    }

    fn push_file(
        &self,
        local: &Path,
        host: &str,
        remote: &str,
        control: &StepControl,
    ) -> Result<TransferOutput, TransferError> {
        let args = self.file_args(
            local.to_string_lossy().into_owned(),
            format!("{}:{}", host, remote),
        );
        self.run(args, control)
    }

    fn pull_file(
        &self,
        host: &str,
        remote: &str,
        local: &Path,
        control: &StepControl,
    ) -> Result<TransferOutput, TransferError> {
        let args = self.file_args(
            format!("{}:{}", host, remote),
            local.to_string_lossy().into_owned(),
        );
        self.run(args, control)
    }
}
