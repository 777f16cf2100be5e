use crossterm::style::Color;

/// Design tokens for Cutover console output.
///
/// - Semantic colors only (`colors::*`)
/// - Icons come from `icons` or `icons_ascii`, never inline literals
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    /// Service names
    pub const SERVICE: Color = Color::Cyan;
    /// Local and remote paths
    pub const PATH: Color = Color::Magenta;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const SKIPPED: &str = "○";
    pub const ARROW: &str = "↳";
    pub const DEPLOY: &str = "📦";
    pub const REMOTE: &str = "📡";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const SKIPPED: &str = "[SKIP]";
    pub const ARROW: &str = "->";
    pub const DEPLOY: &str = "[DEPLOY]";
    pub const REMOTE: &str = "[REMOTE]";
}

/// Icon set selected once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icons {
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub skipped: &'static str,
    pub arrow: &'static str,
    pub deploy: &'static str,
    pub remote: &'static str,
}

impl Icons {
    pub fn new(unicode: bool) -> Self {
        if unicode {
            Self {
                success: icons::SUCCESS,
                error: icons::ERROR,
                warning: icons::WARNING,
                skipped: icons::SKIPPED,
                arrow: icons::ARROW,
                deploy: icons::DEPLOY,
                remote: icons::REMOTE,
            }
        } else {
            Self {
                success: icons_ascii::SUCCESS,
                error: icons_ascii::ERROR,
                warning: icons_ascii::WARNING,
                skipped: icons_ascii::SKIPPED,
                arrow: icons_ascii::ARROW,
                deploy: icons_ascii::DEPLOY,
                remote: icons_ascii::REMOTE,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_icons_are_ascii() {
        let icons = Icons::new(false);
        for icon in [
            icons.success,
            icons.error,
            icons.warning,
            icons.skipped,
            icons.arrow,
            icons.deploy,
            icons.remote,
        ] {
            assert!(icon.is_ascii(), "{icon} is not ascii");
        }
    }
}
