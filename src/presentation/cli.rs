//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--config, --json, --color, --verbose) are inherited by all
//! subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Cutover - versioned release deployment over ssh and rsync
#[derive(Parser, Debug)]
#[command(name = "cutover")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Deploy file (default: .deploy.yml, then .deploy.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v shows remote output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a new release to a target and cut the live symlink over
    Deploy {
        /// Target name from the deploy file
        target: String,

        /// Local directory to mirror into the release
        #[arg(long, default_value = "./", value_name = "PATH")]
        src: PathBuf,

        /// Skip remote dependency installation
        #[arg(long)]
        no_install: bool,

        /// Do not stop/start the supervised service
        #[arg(long)]
        no_service: bool,

        /// Do not link the live config file into the release
        #[arg(long)]
        no_config_symlink: bool,

        /// Skip confirmation prompts
        #[arg(short, long)]
        silent: bool,

        /// Release version (overrides `version` in the deploy file)
        #[arg(long, value_name = "VERSION")]
        release_version: Option<String>,

        /// Appended to the release version (e.g. -rc1)
        #[arg(long, value_name = "SUFFIX", allow_hyphen_values = true)]
        version_suffix: Option<String>,
    },

    /// Push the local config.<target>.<ext> and restart the service
    PushConfig {
        /// Target name from the deploy file
        target: String,

        /// Skip confirmation prompts
        #[arg(short, long)]
        silent: bool,
    },

    /// Fetch the live config file into config.<target>.<ext>
    PullConfig {
        /// Target name from the deploy file
        target: String,
    },

    /// List configured targets
    Targets,
}
