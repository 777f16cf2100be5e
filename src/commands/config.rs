use anyhow::Result;
use cutover::config::ResolveOptions;

use super::CommandContext;

pub fn cmd_push_config(ctx: &CommandContext, target: &str, silent: bool) -> Result<()> {
    let resolve = ResolveOptions {
        silent,
        ..ResolveOptions::default()
    };
    ctx.use_case(target, &resolve)?.push_config()?;
    Ok(())
}

pub fn cmd_pull_config(ctx: &CommandContext, target: &str) -> Result<()> {
    let path = ctx
        .use_case(target, &ResolveOptions::default())?
        .pull_config()?;

    if !ctx.ui.json {
        println!("Saved {}", path.display());
    }
    Ok(())
}
