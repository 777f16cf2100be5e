use is_terminal::IsTerminal;

use crate::presentation::ColorWhen;

/// Output decisions made once per run from flags, environment and terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: Option<ColorWhen>) -> Self {
        Self::from_env(
            json,
            verbose,
            cli_color,
            |key| std::env::var(key).ok(),
            std::io::stdout().is_terminal(),
        )
    }

    pub(crate) fn from_env(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        get_env: impl Fn(&str) -> Option<String>,
        is_tty: bool,
    ) -> Self {
        let term = get_env("TERM").unwrap_or_default();
        let term_is_dumb = term.eq_ignore_ascii_case("dumb");
        let no_color = get_env("NO_COLOR").is_some() || get_env("CUTOVER_NO_COLOR").is_some();

        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => is_tty && !term_is_dumb && !no_color,
        };

        Self {
            json,
            verbose,
            color: color && !json,
            unicode: !term_is_dumb && unicode_locale(&get_env),
        }
    }
}

fn unicode_locale(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    for key in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Some(val) = get_env(key) {
            let v = val.to_lowercase();
            if v == "c" || v == "posix" {
                return false;
            }
            if v.contains("utf-8") || v.contains("utf8") {
                return true;
            }
        }
    }
    true
}
