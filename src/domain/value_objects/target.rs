//! Deployment Target Value Objects
//!
//! `DeploymentTarget` is resolved once from configuration and read-only
//! afterwards. `ReleaseLayout` derives the remote paths a deploy touches.

use std::fmt;

/// Directory name of the in-progress / live release under the app location.
pub const CURRENT_DIR: &str = "cur";

/// Directory name of the last-known-good release under the app location.
pub const PREVIOUS_DIR: &str = "prev";

/// A named remote deployment destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    /// Target name as configured (e.g. "staging")
    name: String,
    /// Remote shell connection string (`user@host`)
    host: String,
    /// Absolute base application directory on the remote host
    app_location: String,
    /// Absolute path of the symlink pointing at the live release
    symlink_location: String,
    /// Supervised service name
    service: String,
    /// Release version string
    version: String,
    /// Skip confirmation prompts
    silent: bool,
}

impl DeploymentTarget {
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        app_location: impl Into<String>,
        symlink_location: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            app_location: app_location.into(),
            symlink_location: symlink_location.into(),
            service: service.into(),
            version: "0.0.0".to_string(),
            silent: false,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn app_location(&self) -> &str {
        &self.app_location
    }

    pub fn symlink_location(&self) -> &str {
        &self.symlink_location
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Remote release directories derived from this target
    pub fn layout(&self) -> ReleaseLayout {
        ReleaseLayout::new(&self.app_location, &self.symlink_location)
    }
}

impl fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.host)
    }
}

/// Remote paths involved in a release.
///
/// At quiescent times `symlink_target` resolves to `current`. After a failed
/// deploy it may point at a directory that no longer exists; callers must not
/// assume liveness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLayout {
    pub current: String,
    pub previous: String,
    pub symlink_target: String,
}

impl ReleaseLayout {
    pub fn new(app_location: &str, symlink_location: &str) -> Self {
        Self {
            current: join_remote(app_location, CURRENT_DIR),
            previous: join_remote(app_location, PREVIOUS_DIR),
            symlink_target: symlink_location.to_string(),
        }
    }
}

/// Join remote (POSIX) path segments without touching the local path rules.
pub fn join_remote(base: &str, segment: &str) -> String {
    if base.is_empty() {
        return segment.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}
