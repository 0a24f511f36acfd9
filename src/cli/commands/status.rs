//! Status command implementation.
//!
//! The `toolstrap status` command reports toolchain versions and which
//! catalog executables are on PATH. It never changes anything.

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::reconcile::is_present;
use crate::shell::apply_to_current_session;
use crate::toolchain::{profile_entries, ToolchainState, VersionInfo, VersionOracle};
use crate::ui::{Table, UserInterface};

use super::context::{describe_source, CommandContext, GlobalOptions};
use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    options: GlobalOptions,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(options: &GlobalOptions, args: StatusArgs) -> Self {
        Self {
            options: options.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }

    fn show_toolchain(&self, ctx: &CommandContext, ui: &mut dyn UserInterface) -> Result<()> {
        let oracle = VersionOracle::new(ctx.toolchain())?;
        let installed = oracle.detect_installed();
        let installed_str = installed
            .map(|v| v.to_string())
            .unwrap_or_else(|| "not installed".to_string());

        if self.args.offline {
            ui.message(&format!("Toolchain: {}", installed_str));
            return Ok(());
        }

        match oracle.fetch_desired() {
            Ok(desired) => {
                let desired_version = desired.version;
                let state = ToolchainState::from_info(&VersionInfo { installed, desired });
                ui.message(&format!(
                    "Toolchain: {} (desired {}, {})",
                    installed_str, desired_version, state
                ));
            }
            Err(e) => {
                ui.message(&format!("Toolchain: {}", installed_str));
                ui.warning(&format!("Could not determine desired version: {}", e));
            }
        }
        Ok(())
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = CommandContext::load(&self.options)?;
        let catalog = ctx.catalog(&[])?;

        ui.show_header("toolstrap status");
        ui.message(&format!("Config:  {}", describe_source(ctx.source())));
        ui.message(&format!("Profile: {}", ctx.profile().display()));

        self.show_toolchain(&ctx, ui)?;

        apply_to_current_session(&profile_entries(ctx.toolchain()));

        let mut table = Table::new(["Tool", "Executable", "Status"]);
        let mut missing = 0;
        for tool in catalog.iter() {
            let status = if is_present(&tool.executable) {
                "present"
            } else {
                missing += 1;
                "missing"
            };
            table.add_row([tool.name.as_str(), tool.executable.as_str(), status]);
        }

        ui.message("");
        if ui.is_interactive() {
            ui.message(&table.render());
        } else {
            ui.message(&table.render_plain());
        }
        ui.message("");
        ui.message(&format!(
            "{} of {} tools present",
            catalog.len() - missing,
            catalog.len()
        ));

        Ok(CommandResult::success())
    }
}
