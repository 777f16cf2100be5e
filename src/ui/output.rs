//! Plain console output outside of pipeline events: config warnings, target
//! listings and top-level errors.

use std::io::Write;

use crate::application::DeployReport;
use crate::config::{ConfigWarning, TargetConfig};
use crate::ui::theme::Icons;
use crate::ui::{ColoredText, UiContext};

pub fn print_config_warnings(ui: &UiContext, warnings: &[ConfigWarning]) {
    let mut err = std::io::stderr().lock();
    let _ = write_config_warnings(&mut err, ui, warnings);
}

pub fn write_config_warnings<W: Write>(
    out: &mut W,
    ui: &UiContext,
    warnings: &[ConfigWarning],
) -> std::io::Result<()> {
    let icons = Icons::new(ui.unicode);
    for w in warnings {
        let location = match w.line {
            Some(line) => format!("{}:{}", w.file.display(), line),
            None => w.file.display().to_string(),
        };
        let text = format!(
            "{} Unknown config key '{}' in {}",
            icons.warning, w.key, location
        );
        writeln!(out, "{}", ColoredText::warning(text).render(ui.color))?;

        if let Some(suggestion) = &w.suggestion {
            writeln!(out, "   Did you mean '{}'?", suggestion)?;
        }
    }
    Ok(())
}

/// Lines describing one configured target
pub fn target_lines(ui: &UiContext, name: &str, target: &TargetConfig) -> Vec<String> {
    let paint = |text: ColoredText| text.render(ui.color);
    vec![
        format!("{} ({})", ColoredText::dim(name).bold().render(ui.color), target.host),
        format!("  app:     {}", paint(ColoredText::path(target.app_location.as_str()))),
        format!("  symlink: {}", paint(ColoredText::path(target.symlink_location.as_str()))),
        format!("  service: {}", paint(ColoredText::service(target.service.as_str()))),
    ]
}

pub fn print_deploy_summary(ui: &UiContext, report: &DeployReport, service: &str) {
    let mut out = std::io::stdout().lock();
    let _ = write_deploy_summary(&mut out, ui, report, service);
}

/// Follow-up hints after a successful deploy
pub fn write_deploy_summary<W: Write>(
    out: &mut W,
    ui: &UiContext,
    report: &DeployReport,
    service: &str,
) -> std::io::Result<()> {
    if report.had_warnings() {
        let icons = Icons::new(ui.unicode);
        let text = format!(
            "{} Service '{}' is not registered with the supervisor; it was neither stopped nor started",
            icons.warning, service
        );
        writeln!(out, "{}", ColoredText::warning(text).render(ui.color))?;
    }
    Ok(())
}

pub fn print_error(ui: &UiContext, message: &str) {
    let icons = Icons::new(ui.unicode);
    eprintln!(
        "{}",
        ColoredText::error(format!("{} Error: {}", icons.error, message)).render(ui.color)
    );
}
