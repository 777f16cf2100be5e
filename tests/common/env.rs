//! Test environment builder for isolated Cutover testing.
//!
//! `TestEnv` owns three temp directories: the local project the binary runs
//! in, the "remote" filesystem the fake ssh operates on, and a log directory
//! the fakes record into.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

use super::fakes::fake_bin_dir;

/// Result of running a Cutover CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestEnv {
    pub project: TempDir,
    pub remote: TempDir,
    pub logs: TempDir,
}

impl TestEnv {
    /// Project with one `staging` target whose paths live under the remote dir
    pub fn new() -> Self {
        let env = Self {
            project: TempDir::new().unwrap(),
            remote: TempDir::new().unwrap(),
            logs: TempDir::new().unwrap(),
        };
        fs::create_dir_all(env.remote_path("srv/www")).unwrap();
        env.write_deploy_file("");
        env
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project.path().join(relative)
    }

    pub fn remote_path(&self, relative: &str) -> PathBuf {
        self.remote.path().join(relative)
    }

    pub fn app_location(&self) -> PathBuf {
        self.remote_path("srv/app")
    }

    pub fn symlink_location(&self) -> PathBuf {
        self.remote_path("srv/www/app")
    }

    /// Write `.deploy.yml`; `settings` is inserted as the `settings:` body
    pub fn write_deploy_file(&self, settings: &str) {
        let mut content = format!(
            "version: 1.4.0\ntargets:\n  staging:\n    host: deploy@staging.example.com\n    app_location: {}\n    symlink_location: {}\n    service: app\n",
            self.app_location().display(),
            self.symlink_location().display(),
        );
        if !settings.is_empty() {
            content.push_str("settings:\n");
            for line in settings.lines() {
                content.push_str("  ");
                content.push_str(line);
                content.push('\n');
            }
        }
        fs::write(self.project_path(".deploy.yml"), content).unwrap();
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        write_file(&self.project_path(relative), content);
    }

    pub fn write_remote_file(&self, relative: &str, content: &str) {
        write_file(&self.remote_path(relative), content);
    }

    pub fn read_remote_file(&self, relative: &str) -> Option<String> {
        fs::read_to_string(self.remote_path(relative)).ok()
    }

    /// Register the supervised service `name` as running or stopped
    pub fn register_service(&self, name: &str, running: bool) {
        let state = if running { "running" } else { "stopped" };
        fs::write(self.logs.path().join(format!("{}.state", name)), state).unwrap();
    }

    pub fn service_state(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.logs.path().join(format!("{}.state", name)))
            .ok()
            .map(|s| s.trim().to_string())
    }

    /// Supervisor invocations in order (`stop app`, `start app`)
    pub fn service_log(&self) -> Vec<String> {
        self.log_lines("service.log")
    }

    /// Scripts handed to ssh, in order
    pub fn ssh_scripts(&self) -> Vec<String> {
        fs::read_to_string(self.logs.path().join("ssh.log"))
            .unwrap_or_default()
            .split("\n---\n")
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Argument lines of every rsync invocation
    pub fn rsync_calls(&self) -> Vec<String> {
        self.log_lines("rsync.log")
    }

    fn log_lines(&self, name: &str) -> Vec<String> {
        fs::read_to_string(self.logs.path().join(name))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let bin_dir = fake_bin_dir();
        let path = format!(
            "{}:{}",
            bin_dir.display(),
            std::env::var("PATH").unwrap_or_default()
        );

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cutover"));
        cmd.current_dir(self.project.path())
            .args(args)
            .stdin(Stdio::null())
            .env("PATH", path)
            .env("CUTOVER_SSH_COMMAND", bin_dir.join("ssh"))
            .env("CUTOVER_RSYNC_COMMAND", bin_dir.join("rsync"))
            .env("FAKE_LOG_DIR", self.logs.path())
            .env("NO_COLOR", "1")
            .env("LANG", "C")
            .env_remove("LC_ALL")
            .env_remove("LC_CTYPE")
            .env_remove("CUTOVER_SILENT");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        to_result(cmd.output().expect("Failed to execute cutover"))
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
