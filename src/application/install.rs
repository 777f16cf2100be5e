//! Remote dependency installation inside a release directory.
//!
//! The default script installs production npm packages, honoring `.nvmrc`
//! when `nvm` is on the remote PATH, and echoes tool versions between
//! markers so they can be reported afterwards.

use crate::domain::ports::RemoteError;
use crate::domain::value_objects::{quote, Script};

use super::executor::{ExecOptions, RemoteExecutor};

const NVM_MARKER: &str = "### NVM INSTALL INVOKED ###";
const NODE_PREFIX: &str = "### NODE VERSION: ";
const NPM_PREFIX: &str = "### NPM VERSION: ";
const MARKER_SUFFIX: &str = " ###";

/// What the install script reported on stdout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub node_version: Option<String>,
    pub npm_version: Option<String>,
    pub nvm_invoked: bool,
    pub stdout: String,
}

impl InstallReport {
    pub fn parse(stdout: &str) -> Self {
        Self {
            node_version: marker_value(stdout, NODE_PREFIX),
            npm_version: marker_value(stdout, NPM_PREFIX),
            nvm_invoked: stdout.lines().any(|l| l.trim() == NVM_MARKER),
            stdout: stdout.to_string(),
        }
    }
}

fn marker_value(stdout: &str, prefix: &str) -> Option<String> {
    stdout.lines().find_map(|line| {
        line.trim()
            .strip_prefix(prefix)?
            .strip_suffix(MARKER_SUFFIX)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Build the install script for `dir`.
///
/// `custom` replaces every statement after the `cd`.
pub fn install_script(dir: &str, custom: Option<&str>) -> Script {
    let script = Script::line(format!("cd {}", quote(dir)));
    match custom {
        Some(command) => script.then(command),
        None => script
            .then("if [ -f .nvmrc ] && ( hash nvm 2>/dev/null ); then")
            .then("  nvm install")
            .then(format!("  echo \"{}\"", NVM_MARKER))
            .then("fi")
            .then(format!(
                "echo \"{}$(node --version){}\"",
                NODE_PREFIX, MARKER_SUFFIX
            ))
            .then(format!(
                "echo \"{}$(npm --version){}\"",
                NPM_PREFIX, MARKER_SUFFIX
            ))
            .then("npm install --production"),
    }
}

/// Run the install script in `dir` and parse what it printed.
pub fn install_dependencies(
    exec: &RemoteExecutor<'_>,
    dir: &str,
    custom: Option<&str>,
) -> Result<InstallReport, RemoteError> {
    let result = exec.execute(&install_script(dir, custom), ExecOptions::default())?;
    Ok(InstallReport::parse(&result.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeRemote;
    use crate::domain::ports::deploy_events::testing::RecordingEventSink;
    use crate::domain::value_objects::StepControl;

    #[test]
    fn default_script_shape() {
        insta::assert_snapshot!(install_script("/srv/app/cur", None).body(), @r####"
        cd "/srv/app/cur"
        if [ -f .nvmrc ] && ( hash nvm 2>/dev/null ); then
          nvm install
          echo "### NVM INSTALL INVOKED ###"
        fi
        echo "### NODE VERSION: $(node --version) ###"
        echo "### NPM VERSION: $(npm --version) ###"
        npm install --production
        "####);
    }

    #[test]
    fn custom_command_replaces_body() {
        let script = install_script("/srv/app/cur", Some("npm ci --omit=dev"));
        assert_eq!(script.body(), "cd \"/srv/app/cur\"\nnpm ci --omit=dev");
    }

    #[test]
    fn parses_markers() {
        let report = InstallReport::parse(
            "### NVM INSTALL INVOKED ###\n### NODE VERSION: v20.11.1 ###\n### NPM VERSION: 10.2.4 ###\nadded 3 packages\n",
        );
        assert_eq!(report.node_version.as_deref(), Some("v20.11.1"));
        assert_eq!(report.npm_version.as_deref(), Some("10.2.4"));
        assert!(report.nvm_invoked);
    }

    #[test]
    fn missing_markers_are_none() {
        let report = InstallReport::parse("up to date in 1s\n");
        assert_eq!(report.node_version, None);
        assert_eq!(report.npm_version, None);
        assert!(!report.nvm_invoked);
    }

    #[test]
    fn runs_in_release_directory() {
        let remote = FakeRemote::new();
        remote.put_dir("/srv/app/cur");
        let sink = RecordingEventSink::new();
        let exec = RemoteExecutor::new(&remote, "h", &sink, StepControl::unbounded());

        let report = install_dependencies(&exec, "/srv/app/cur", None).unwrap();

        assert_eq!(remote.npm_installs(), vec!["/srv/app/cur".to_string()]);
        assert_eq!(report.node_version.as_deref(), Some("v18.19.0"));
        assert_eq!(report.npm_version.as_deref(), Some("10.2.3"));
        assert!(!report.nvm_invoked);
    }
}
