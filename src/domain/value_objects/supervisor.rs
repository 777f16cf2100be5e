//! Process Supervisor Flavours

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::shell::quote;

/// The remote process supervisor that owns the deployed service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Supervisor {
    #[default]
    Upstart,
    Systemd,
}

impl Supervisor {
    pub fn stop_command(self, service: &str) -> String {
        match self {
            Self::Upstart => format!("stop {}", quote(service)),
            Self::Systemd => format!("systemctl stop {}", quote(service)),
        }
    }

    pub fn start_command(self, service: &str) -> String {
        match self {
            Self::Upstart => format!("start {}", quote(service)),
            Self::Systemd => format!("systemctl start {}", quote(service)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upstart => "upstart",
            Self::Systemd => "systemd",
        }
    }
}

impl fmt::Display for Supervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Supervisor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upstart" => Ok(Self::Upstart),
            "systemd" | "systemctl" => Ok(Self::Systemd),
            other => Err(format!(
                "unknown supervisor '{}' (expected upstart or systemd)",
                other
            )),
        }
    }
}
