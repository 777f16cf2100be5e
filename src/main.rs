//! Cutover CLI - versioned release deployment over ssh and rsync
//!
//! Usage: cutover [--config PATH] [--json] [--color WHEN] [-v] <COMMAND>
//!
//! Commands:
//!   deploy       Deploy a new release and cut the live symlink over
//!   push-config  Push the local config file and restart the service
//!   pull-config  Fetch the live config file
//!   targets      List configured targets

mod commands;

use std::process::ExitCode;

use clap::Parser;
use cutover::domain::value_objects::CancelToken;
use cutover::presentation::{Cli, Commands};
use cutover::ui::output::print_error;
use cutover::ui::UiContext;
use cutover::DeployError;
use serde_json::json;

use commands::deploy::DeployArgs;
use commands::CommandContext;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let ui = UiContext::new(cli.json, cli.verbose, cli.color);

    let cancel = CancelToken::new();
    install_interrupt_handler(&cancel);

    let ctx = CommandContext {
        ui,
        config: cli.config,
        cancel,
    };

    match run(&ctx, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Pipeline failures and declines were already reported by the event sink
            if err.downcast_ref::<DeployError>().is_none() {
                if ui.json {
                    println!("{}", json!({ "event": "error", "message": format!("{:#}", err) }));
                } else {
                    print_error(&ui, &format!("{:#}", err));
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(ctx: &CommandContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Deploy {
            target,
            src,
            no_install,
            no_service,
            no_config_symlink,
            silent,
            release_version,
            version_suffix,
        } => commands::deploy::cmd_deploy(
            ctx,
            DeployArgs {
                target,
                src,
                no_install,
                no_service,
                no_config_symlink,
                silent,
                release_version,
                version_suffix,
            },
        ),
        Commands::PushConfig { target, silent } => {
            commands::config::cmd_push_config(ctx, &target, silent)
        }
        Commands::PullConfig { target } => commands::config::cmd_pull_config(ctx, &target),
        Commands::Targets => commands::targets::cmd_targets(ctx),
    }
}

/// First Ctrl+C cancels the running step; a second one exits immediately.
fn install_interrupt_handler(cancel: &CancelToken) {
    let token = cancel.clone();
    let result = ctrlc::set_handler(move || {
        if token.is_cancelled() {
            std::process::exit(130);
        }
        token.cancel();
    });
    if let Err(err) = result {
        eprintln!("Warning: could not install Ctrl+C handler: {}", err);
    }
}
