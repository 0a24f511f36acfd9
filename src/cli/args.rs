//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// toolstrap - Bootstrap a Go toolchain and install recon tools.
#[derive(Debug, Parser)]
#[command(name = "toolstrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.config/toolstrap/config.yml)
    #[arg(short, long, global = true, env = "TOOLSTRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Shell profile to write environment lines to
    #[arg(long, global = true, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bootstrap the toolchain, then install the catalog (default)
    Run(RunArgs),

    /// Install or update the Go toolchain only
    Toolchain(ToolchainArgs),

    /// Install the catalog only (expects the toolchain to be present)
    Tools(ToolsArgs),

    /// Show toolchain and tool status without changing anything
    Status(StatusArgs),

    /// List the effective tool catalog
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Install only these executables (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Don't touch the toolchain; reconcile tools only
    #[arg(long)]
    pub skip_toolchain: bool,

    /// Show what would be done without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `toolchain` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ToolchainArgs {
    /// Show what would be done without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `tools` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ToolsArgs {
    /// Install only these executables (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Show what would be done without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Don't query the version feed
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["toolstrap"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn run_only_splits_on_commas() {
        let cli = Cli::try_parse_from(["toolstrap", "run", "--only", "httpx,nuclei"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.only, vec!["httpx", "nuclei"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "toolstrap",
            "toolchain",
            "--dry-run",
            "--profile",
            "/tmp/rc",
            "--debug",
        ])
        .unwrap();

        assert!(cli.debug);
        assert_eq!(cli.profile, Some(PathBuf::from("/tmp/rc")));
        assert!(matches!(
            cli.command,
            Some(Commands::Toolchain(ToolchainArgs { dry_run: true }))
        ));
    }

    #[test]
    fn status_offline_flag() {
        let cli = Cli::try_parse_from(["toolstrap", "status", "--offline"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Status(StatusArgs { offline: true }))
        ));
    }

    #[test]
    fn completions_requires_shell() {
        assert!(Cli::try_parse_from(["toolstrap", "completions"]).is_err());
        assert!(Cli::try_parse_from(["toolstrap", "completions", "zsh"]).is_ok());
    }
}
