use anyhow::Result;
use cutover::config::TargetConfig;
use cutover::ui::output::target_lines;
use cutover::ui::UiContext;
use cutover::DeploymentTarget;
use serde_json::json;

use super::CommandContext;

pub fn cmd_targets(ctx: &CommandContext) -> Result<()> {
    let loaded = ctx.load_config()?;
    let targets = &loaded.file.targets;

    if ctx.ui.json {
        let list: Vec<_> = targets
            .iter()
            .map(|(name, t)| {
                json!({
                    "name": name,
                    "host": t.host,
                    "app_location": t.app_location,
                    "symlink_location": t.symlink_location,
                    "service": t.service,
                })
            })
            .collect();
        println!(
            "{}",
            json!({
                "event": "targets",
                "config": loaded.path.display().to_string(),
                "targets": list,
            })
        );
        return Ok(());
    }

    if targets.is_empty() {
        println!("No targets configured in {}", loaded.path.display());
        return Ok(());
    }

    for (name, target) in targets {
        for line in target_lines(&ctx.ui, name, target) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Print the resolved configuration a pipeline is about to use
pub fn print_resolved(ui: &UiContext, target: &DeploymentTarget) {
    let shown = TargetConfig {
        host: target.host().to_string(),
        app_location: target.app_location().to_string(),
        symlink_location: target.symlink_location().to_string(),
        service: target.service().to_string(),
    };
    for line in target_lines(ui, target.name(), &shown) {
        println!("{}", line);
    }
    println!("  version: {}", target.version());
}
