//! Run command implementation.
//!
//! The `toolstrap run` command (the default) bootstraps the toolchain and
//! then reconciles the catalog. A toolchain failure stops the run before any
//! tool is attempted.

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::shell::apply_to_current_session;
use crate::toolchain::profile_entries;
use crate::ui::UserInterface;

use super::context::{CommandContext, GlobalOptions};
use super::dispatcher::{Command, CommandResult};
use super::toolchain::bootstrap_toolchain;
use super::tools::reconcile_catalog;

/// The run command implementation.
pub struct RunCommand {
    options: GlobalOptions,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(options: &GlobalOptions, args: RunArgs) -> Self {
        Self {
            options: options.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = CommandContext::load(&self.options)?;
        // Resolve the catalog first so a bad --only fails before any download.
        let catalog = ctx.catalog(&self.args.only)?;

        if self.args.skip_toolchain {
            tracing::debug!("Skipping toolchain bootstrap");
        } else {
            bootstrap_toolchain(&ctx, ui, self.args.dry_run)?;
        }

        // A real bootstrap already did this; the other paths still need
        // <gopath>/bin on PATH for presence checks.
        if self.args.skip_toolchain || self.args.dry_run {
            apply_to_current_session(&profile_entries(ctx.toolchain()));
        }

        reconcile_catalog(&ctx, &catalog, ui, self.args.dry_run)
    }
}
