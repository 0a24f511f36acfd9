//! Tools command implementation.
//!
//! The `toolstrap tools` command reconciles the catalog against PATH,
//! assuming the toolchain is already in place.

use crate::catalog::{Catalog, ToolDescriptor};
use crate::cli::args::ToolsArgs;
use crate::error::Result;
use crate::reconcile::{is_present, run_inject, GoFetcher, ReconcileContext, Reconciler};
use crate::shell::apply_to_current_session;
use crate::toolchain::profile_entries;
use crate::ui::UserInterface;

use super::context::{CommandContext, GlobalOptions};
use super::dispatcher::{Command, CommandResult};

/// The tools command implementation.
pub struct ToolsCommand {
    options: GlobalOptions,
    args: ToolsArgs,
}

impl ToolsCommand {
    /// Create a new tools command.
    pub fn new(options: &GlobalOptions, args: ToolsArgs) -> Self {
        Self {
            options: options.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ToolsArgs {
        &self.args
    }
}

impl Command for ToolsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = CommandContext::load(&self.options)?;
        let catalog = ctx.catalog(&self.args.only)?;

        // Without a bootstrap in this process, PATH may not yet include
        // the toolchain and <gopath>/bin.
        apply_to_current_session(&profile_entries(ctx.toolchain()));

        reconcile_catalog(&ctx, &catalog, ui, self.args.dry_run)
    }
}

/// Reconcile `catalog`, show the summary and map it to an exit code.
pub(super) fn reconcile_catalog(
    ctx: &CommandContext,
    catalog: &Catalog,
    ui: &mut dyn UserInterface,
    dry_run: bool,
) -> Result<CommandResult> {
    let fetcher = GoFetcher::new(ctx.toolchain());
    let fetch = |tool: &ToolDescriptor| fetcher.fetch(tool);
    let reconciler = Reconciler::new(ReconcileContext {
        is_present: &is_present,
        fetch: &fetch,
        run_inject: &run_inject,
    });

    if dry_run {
        ui.show_header("Recon tools (dry run)");
        for planned in reconciler.plan(catalog) {
            if planned.present {
                ui.message(&format!("  {} already present", planned.tool.executable));
            } else {
                ui.message(&format!(
                    "  would fetch {} ({})",
                    planned.tool.executable,
                    planned.tool.install_target()
                ));
            }
        }
        return Ok(CommandResult::success());
    }

    ui.show_header(&format!("Recon tools ({})", catalog.len()));
    let summary = reconciler.run(catalog, ui);
    ui.show_summary(&summary);

    if ui.output_mode().shows_details() {
        for result in summary.inject_failures() {
            if let Some(command) = &result.tool.inject {
                ui.message(&format!(
                    "  post-install for {} can be retried with: {}",
                    result.tool.executable, command
                ));
            }
        }
    }

    if summary.has_failures() {
        ui.error("Some tools are not installed");
        Ok(CommandResult::failure(summary.exit_code()))
    } else {
        ui.success("All tools installed");
        Ok(CommandResult::success())
    }
}
