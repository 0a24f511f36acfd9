//! List command implementation.
//!
//! The `toolstrap list` command prints the effective catalog.

use crate::cli::args::ListArgs;
use crate::error::{Result, ToolstrapError};
use crate::ui::{Table, UserInterface};

use super::context::{describe_source, CommandContext, GlobalOptions};
use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    options: GlobalOptions,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(options: &GlobalOptions, args: ListArgs) -> Self {
        Self {
            options: options.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = CommandContext::load(&self.options)?;
        let catalog = ctx.catalog(&[])?;

        if self.args.json {
            let json = serde_json::to_string_pretty(catalog.tools())
                .map_err(|e| ToolstrapError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let mut table = Table::new(["Tool", "Executable", "Source", "Post-install"]);
        for tool in catalog.iter() {
            table.add_row([
                tool.name.as_str(),
                tool.executable.as_str(),
                tool.source.as_str(),
                tool.inject.as_deref().unwrap_or(""),
            ]);
        }

        ui.message(&format!(
            "{} tools from {}",
            catalog.len(),
            describe_source(ctx.source())
        ));
        if ui.is_interactive() {
            ui.message(&table.render());
        } else {
            ui.message(&table.render_plain());
        }

        Ok(CommandResult::success())
    }
}
