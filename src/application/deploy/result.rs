//! Deploy Result

use crate::application::install::InstallReport;
use crate::domain::ports::ServiceAction;
use crate::domain::services::ToleratedReason;

/// What a successful deploy did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub version: String,
    /// Remote directory now holding the live release
    pub release_dir: String,
    /// Whether an existing release was moved into the previous slot
    pub retired_previous: bool,
    /// Supervisor conditions that were tolerated along the way
    pub tolerated: Vec<(ServiceAction, ToleratedReason)>,
    pub install: Option<InstallReport>,
}

impl DeployReport {
    pub fn new(version: impl Into<String>, release_dir: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            release_dir: release_dir.into(),
            retired_previous: false,
            tolerated: Vec::new(),
            install: None,
        }
    }

    pub fn had_warnings(&self) -> bool {
        self.tolerated.iter().any(|(_, reason)| reason.is_warning())
    }
}
