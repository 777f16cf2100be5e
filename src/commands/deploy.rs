use std::path::PathBuf;

use anyhow::Result;
use cutover::config::ResolveOptions;
use cutover::ui::output::print_deploy_summary;
use cutover::DeployOptions;

use super::CommandContext;

#[derive(Debug, Clone)]
pub struct DeployArgs {
    pub target: String,
    pub src: PathBuf,
    pub no_install: bool,
    pub no_service: bool,
    pub no_config_symlink: bool,
    pub silent: bool,
    pub release_version: Option<String>,
    pub version_suffix: Option<String>,
}

pub fn cmd_deploy(ctx: &CommandContext, args: DeployArgs) -> Result<()> {
    let resolve = ResolveOptions {
        release_version: args.release_version,
        version_suffix: args.version_suffix,
        silent: args.silent,
    };
    let use_case = ctx.use_case(&args.target, &resolve)?;

    if !ctx.ui.json {
        super::targets::print_resolved(&ctx.ui, use_case.target());
    }

    let options = DeployOptions::default()
        .with_src(args.src)
        .with_install_dependencies(!args.no_install)
        .with_manage_service(!args.no_service)
        .with_symlink_config_file(!args.no_config_symlink);

    let report = use_case.deploy(&options)?;
    if !ctx.ui.json {
        print_deploy_summary(&ctx.ui, &report, use_case.target().service());
    }
    Ok(())
}
