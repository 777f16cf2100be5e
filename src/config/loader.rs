//! Deploy file discovery, loading and environment overrides

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::DeployFile;

/// File names looked up in the working directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &[".deploy.yml", ".deploy.yaml"];

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Find the deploy file: an explicit path wins, otherwise the first
/// `CONFIG_FILE_NAMES` entry present under `dir`.
pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(ConfigError::NotFound {
            searched: vec![path.to_path_buf()],
        });
    }

    let candidates: Vec<PathBuf> = CONFIG_FILE_NAMES.iter().map(|n| dir.join(n)).collect();
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    Err(ConfigError::NotFound {
        searched: candidates,
    })
}

/// Load a deploy file and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(DeployFile, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_with_warnings(&content, path)
}

/// Parse deploy file text; `path` is only used in messages and warnings.
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> Result<(DeployFile, Vec<ConfigWarning>), ConfigError> {
    if content.trim().is_empty() {
        return Ok((DeployFile::default(), Vec::new()));
    }

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = serde_yaml_ng::Deserializer::from_str(content);

    let file: DeployFile = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((file, warnings))
}

/// Apply environment variable overrides (CUTOVER_* prefix)
pub fn with_env_overrides(file: DeployFile) -> Result<DeployFile, ConfigError> {
    apply_env_overrides(file, |key| std::env::var(key).ok())
}

pub(crate) fn apply_env_overrides(
    mut file: DeployFile,
    get_env: impl Fn(&str) -> Option<String>,
) -> Result<DeployFile, ConfigError> {
    let settings = &mut file.settings;

    if let Some(val) = get_env("CUTOVER_SILENT") {
        settings.silent = matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes");
    }

    if let Some(val) = get_env("CUTOVER_COMMAND_TIMEOUT_SECS") {
        settings.command_timeout_secs = parse_secs("CUTOVER_COMMAND_TIMEOUT_SECS", &val)?;
    }

    if let Some(val) = get_env("CUTOVER_TRANSFER_TIMEOUT_SECS") {
        settings.transfer_timeout_secs = parse_secs("CUTOVER_TRANSFER_TIMEOUT_SECS", &val)?;
    }

    if let Some(val) = get_env("CUTOVER_SSH_COMMAND").filter(|v| !v.trim().is_empty()) {
        settings.ssh_command = val;
    }

    if let Some(val) = get_env("CUTOVER_RSYNC_COMMAND").filter(|v| !v.trim().is_empty()) {
        settings.rsync_command = val;
    }

    Ok(file)
}

fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::EnvOverride {
        key,
        message: format!("expected a number of seconds, got '{}'", value),
    })
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "version",
        "settings",
        "targets",
        "supervisor",
        "config_extension",
        "ssh_command",
        "ssh_options",
        "rsync_command",
        "install_command",
        "command_timeout_secs",
        "transfer_timeout_secs",
        "silent",
        "host",
        "app_location",
        "symlink_location",
        "service",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            Some((_, best_dist)) if dist >= best_dist => best,
            _ => Some((candidate, dist)),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let b_bytes = b.as_bytes();
    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a.as_bytes().iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
