//! In-memory remote host for application tests.
//!
//! `FakeRemote` interprets the scripts this crate generates (mkdir, rm, mv,
//! ln, the move guard, supervisor commands, the install script) against a
//! path map, and `FakeTransfer` mirrors content into the same map.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::application::remote_fs::NOTHING_TO_MOVE_MARKER;
use crate::domain::ports::{
    ContentTransfer, RemoteCommandResult, RemoteError, RemoteShell, TransferError, TransferOutput,
};
use crate::domain::value_objects::StepControl;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir,
    File(String),
    Link(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Running,
    Stopped,
}

#[derive(Default)]
struct State {
    nodes: BTreeMap<String, Node>,
    scripts: Vec<String>,
    transfers: Vec<String>,
    failures: Vec<(String, String)>,
    timeouts: Vec<String>,
    services: HashMap<String, ServiceState>,
    npm_installs: Vec<String>,
}

impl State {
    fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    fn mkdir_p(&mut self, path: &str) {
        let mut current = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            current.push('/');
            current.push_str(part);
            self.nodes.entry(current.clone()).or_insert(Node::Dir);
        }
    }

    fn remove_tree(&mut self, path: &str) {
        let prefix = format!("{}/", path);
        self.nodes
            .retain(|key, _| key != path && !key.starts_with(&prefix));
    }

    fn rename_tree(&mut self, src: &str, dst: &str) {
        let prefix = format!("{}/", src);
        let moved: Vec<(String, Node)> = self
            .nodes
            .iter()
            .filter(|(key, _)| key.as_str() == src || key.starts_with(&prefix))
            .map(|(key, node)| (format!("{}{}", dst, &key[src.len()..]), node.clone()))
            .collect();
        self.remove_tree(src);
        self.nodes.extend(moved);
    }
}

/// Shared fake host; clones observe the same state.
#[derive(Clone, Default)]
pub struct FakeRemote {
    state: Arc<Mutex<State>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_dir(&self, path: &str) {
        self.state.lock().unwrap().mkdir_p(path);
    }

    pub fn put_file(&self, path: &str, content: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some((parent, _)) = path.rsplit_once('/') {
            state.mkdir_p(parent);
        }
        state
            .nodes
            .insert(path.to_string(), Node::File(content.to_string()));
    }

    pub fn put_link(&self, path: &str, dest: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some((parent, _)) = path.rsplit_once('/') {
            state.mkdir_p(parent);
        }
        state
            .nodes
            .insert(path.to_string(), Node::Link(dest.to_string()));
    }

    pub fn node(&self, path: &str) -> Option<Node> {
        self.state.lock().unwrap().nodes.get(path).cloned()
    }

    pub fn file(&self, path: &str) -> Option<String> {
        match self.node(path) {
            Some(Node::File(content)) => Some(content),
            _ => None,
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.state.lock().unwrap().exists(path)
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.node(path) == Some(Node::Dir)
    }

    /// Everything below `dir`, keyed by path relative to it
    pub fn tree(&self, dir: &str) -> BTreeMap<String, Node> {
        let prefix = format!("{}/", dir);
        self.state
            .lock()
            .unwrap()
            .nodes
            .iter()
            .filter_map(|(key, node)| {
                key.strip_prefix(&prefix)
                    .map(|rel| (rel.to_string(), node.clone()))
            })
            .collect()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.state.lock().unwrap().scripts.clone()
    }

    pub fn transfers(&self) -> Vec<String> {
        self.state.lock().unwrap().transfers.clone()
    }

    pub fn npm_installs(&self) -> Vec<String> {
        self.state.lock().unwrap().npm_installs.clone()
    }

    /// Every statement containing `pattern` fails with `stderr`
    pub fn fail_when_contains(&self, pattern: &str, stderr: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((pattern.to_string(), stderr.to_string()));
    }

    /// Every script containing `pattern` hits its deadline
    pub fn time_out_when_contains(&self, pattern: &str) {
        self.state
            .lock()
            .unwrap()
            .timeouts
            .push(pattern.to_string());
    }

    pub fn register_service(&self, name: &str, state: ServiceState) {
        self.state
            .lock()
            .unwrap()
            .services
            .insert(name.to_string(), state);
    }

    pub fn service(&self, name: &str) -> Option<ServiceState> {
        self.state.lock().unwrap().services.get(name).copied()
    }

    /// Transfer that writes `files` (relative path, content) on sync
    pub fn transfer(&self, files: &[(&str, &str)]) -> FakeTransfer {
        FakeTransfer {
            state: self.state.clone(),
            files: files
                .iter()
                .map(|(p, c)| (p.to_string(), c.to_string()))
                .collect(),
            fail_sync: None,
        }
    }

    fn run_line(
        state: &mut State,
        line: &str,
        cwd: &mut String,
        stdout: &mut String,
    ) -> Result<LineFlow, String> {
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with("if ")
            || trimmed == "fi"
            || line.starts_with(' ')
        {
            return Ok(LineFlow::Continue);
        }

        if let Some((_, stderr)) = state
            .failures
            .iter()
            .find(|(pattern, _)| trimmed.contains(pattern.as_str()))
        {
            return Err(stderr.clone());
        }

        if trimmed.contains(NOTHING_TO_MOVE_MARKER) {
            let words = tokenize(trimmed);
            let src = words.get(2).cloned().unwrap_or_default();
            if state.exists(&src) {
                return Ok(LineFlow::Continue);
            }
            stdout.push_str(NOTHING_TO_MOVE_MARKER);
            stdout.push('\n');
            return Ok(LineFlow::Exit);
        }

        let words = tokenize(trimmed);
        let args: Vec<&str> = words.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["mkdir", "-p", path] => state.mkdir_p(path),
            ["rm", "-fr", path] => state.remove_tree(path),
            ["rm", "-f", path] => {
                if state.nodes.get(*path) == Some(&Node::Dir) {
                    return Err(format!("rm: cannot remove '{}': Is a directory", path));
                }
                state.nodes.remove(*path);
            }
            ["mv", src, dst] => {
                if !state.exists(src) {
                    return Err(format!(
                        "mv: cannot stat '{}': No such file or directory",
                        src
                    ));
                }
                let dst = if state.nodes.get(*dst) == Some(&Node::Dir) {
                    let name = src.rsplit('/').next().unwrap_or(*src);
                    format!("{}/{}", dst, name)
                } else {
                    dst.to_string()
                };
                state.rename_tree(src, &dst);
            }
            ["ln", "-s", dest, link] => {
                let link = if link.starts_with('/') {
                    link.to_string()
                } else {
                    format!("{}/{}", cwd, link)
                };
                if state.exists(&link) {
                    return Err(format!(
                        "ln: failed to create symbolic link '{}': File exists",
                        link
                    ));
                }
                state.nodes.insert(link, Node::Link(dest.to_string()));
            }
            ["stop", name] | ["systemctl", "stop", name] => {
                match state.services.get(*name).copied() {
                    None => return Err(format!("stop: Unknown job: {}", name)),
                    Some(ServiceState::Stopped) => {
                        return Err("stop: Unknown instance: ".to_string())
                    }
                    Some(ServiceState::Running) => {
                        state
                            .services
                            .insert(name.to_string(), ServiceState::Stopped);
                    }
                }
            }
            ["start", name] | ["systemctl", "start", name] => {
                match state.services.get(*name).copied() {
                    None => return Err(format!("start: Unknown job: {}", name)),
                    Some(ServiceState::Running) => {
                        return Err(format!("start: Job is already running: {}", name))
                    }
                    Some(ServiceState::Stopped) => {
                        state
                            .services
                            .insert(name.to_string(), ServiceState::Running);
                    }
                }
            }
            ["cd", dir] => *cwd = dir.to_string(),
            ["echo", rest @ ..] => {
                let text = rest
                    .join(" ")
                    .replace("$(node --version)", "v18.19.0")
                    .replace("$(npm --version)", "10.2.3");
                stdout.push_str(&text);
                stdout.push('\n');
            }
            ["npm", ..] => {
                state.npm_installs.push(cwd.clone());
                stdout.push_str("added 12 packages\n");
            }
            _ => return Err(format!("sh: {}: not found", args.first().unwrap_or(&""))),
        }
        Ok(LineFlow::Continue)
    }
}

enum LineFlow {
    Continue,
    Exit,
}

impl RemoteShell for FakeRemote {
    fn execute(
        &self,
        _host: &str,
        script: &str,
        control: &StepControl,
    ) -> Result<RemoteCommandResult, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.scripts.push(script.to_string());

        if state.timeouts.iter().any(|p| script.contains(p.as_str())) {
            return Err(RemoteError::TimedOut {
                after: control.timeout.unwrap_or(Duration::from_secs(1)),
            });
        }

        let mut lines = script.lines().peekable();
        let fail_fast = lines.peek() == Some(&"set -e");
        if fail_fast {
            lines.next();
        }

        let mut cwd = String::from("/");
        let mut stdout = String::new();
        let mut last_error: Option<String> = None;
        for line in lines {
            match Self::run_line(&mut state, line, &mut cwd, &mut stdout) {
                Ok(LineFlow::Continue) => last_error = None,
                Ok(LineFlow::Exit) => {
                    last_error = None;
                    break;
                }
                Err(stderr) => {
                    if fail_fast {
                        return Err(RemoteError::Failed {
                            status: Some(1),
                            stdout,
                            stderr,
                        });
                    }
                    last_error = Some(stderr);
                }
            }
        }

        match last_error {
            Some(stderr) => Err(RemoteError::Failed {
                status: Some(1),
                stdout,
                stderr,
            }),
            None => Ok(RemoteCommandResult::ok(stdout)),
        }
    }
}

/// Split a statement into words, honoring double quotes and backslash escapes
pub fn tokenize(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

/// Transfer writing into a `FakeRemote`
pub struct FakeTransfer {
    state: Arc<Mutex<State>>,
    files: Vec<(String, String)>,
    fail_sync: Option<(i32, String)>,
}

impl FakeTransfer {
    /// Sync exits with `status` after touching nothing
    pub fn failing_sync(mut self, status: i32, stderr: &str) -> Self {
        self.fail_sync = Some((status, stderr.to_string()));
        self
    }
}

impl ContentTransfer for FakeTransfer {
    fn sync_directory(
        &self,
        local_src: &Path,
        host: &str,
        remote_dir: &str,
        _control: &StepControl,
    ) -> Result<TransferOutput, TransferError> {
        let mut state = self.state.lock().unwrap();
        state.transfers.push(format!(
            "sync {} -> {}:{}",
            local_src.display(),
            host,
            remote_dir
        ));
        if let Some((status, stderr)) = &self.fail_sync {
            return Err(TransferError::Failed {
                status: Some(*status),
                stderr: stderr.clone(),
            });
        }

        let prefix = format!("{}/", remote_dir);
        state.nodes.retain(|key, _| !key.starts_with(&prefix));
        state.mkdir_p(remote_dir);
        for (rel, content) in &self.files {
            let path = format!("{}{}", prefix, rel);
            if let Some((parent, _)) = path.rsplit_once('/') {
                state.mkdir_p(parent);
            }
            state.nodes.insert(path, Node::File(content.clone()));
        }
        Ok(TransferOutput {
            stdout: format!("sent {} files\n", self.files.len()),
        })
    }

    fn push_file(
        &self,
        local: &Path,
        host: &str,
        remote: &str,
        _control: &StepControl,
    ) -> Result<TransferOutput, TransferError> {
        let content = std::fs::read_to_string(local).map_err(|e| TransferError::Failed {
            status: Some(23),
            stderr: e.to_string(),
        })?;
        let mut state = self.state.lock().unwrap();
        state
            .transfers
            .push(format!("push {} -> {}:{}", local.display(), host, remote));
        state.nodes.insert(remote.to_string(), Node::File(content));
        Ok(TransferOutput::default())
    }

    fn pull_file(
        &self,
        host: &str,
        remote: &str,
        local: &Path,
        _control: &StepControl,
    ) -> Result<TransferOutput, TransferError> {
        let mut state = self.state.lock().unwrap();
        state
            .transfers
            .push(format!("pull {}:{} -> {}", host, remote, local.display()));
        let Some(Node::File(content)) = state.nodes.get(remote).cloned() else {
            return Err(TransferError::Failed {
                status: Some(23),
                stderr: format!(
                    "rsync: link_stat \"{}\" failed: No such file or directory (2)",
                    remote
                ),
            });
        };
        std::fs::write(local, content).map_err(|e| TransferError::Failed {
            status: Some(23),
            stderr: e.to_string(),
        })?;
        Ok(TransferOutput::default())
    }
}

#[test]
fn tokenize_handles_quotes_and_escapes() {
    assert_eq!(
        tokenize(r#"mv "/srv/my app" "/a\"b""#),
        vec!["mv", "/srv/my app", "/a\"b"]
    );
}
