//! Toolchain command implementation.
//!
//! The `toolstrap toolchain` command installs or updates the Go toolchain
//! and wires the shell profile.

use crate::cli::args::ToolchainArgs;
use crate::error::Result;
use crate::shell::{can_write_dir, is_elevated};
use crate::toolchain::{BootstrapReport, ToolchainInstaller, ToolchainState};
use crate::ui::UserInterface;

use super::context::{CommandContext, GlobalOptions};
use super::dispatcher::{Command, CommandResult};

/// The toolchain command implementation.
pub struct ToolchainCommand {
    options: GlobalOptions,
    args: ToolchainArgs,
}

impl ToolchainCommand {
    /// Create a new toolchain command.
    pub fn new(options: &GlobalOptions, args: ToolchainArgs) -> Self {
        Self {
            options: options.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ToolchainArgs {
        &self.args
    }
}

impl Command for ToolchainCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = CommandContext::load(&self.options)?;
        bootstrap_toolchain(&ctx, ui, self.args.dry_run)?;
        Ok(CommandResult::success())
    }
}

/// Bootstrap the toolchain, reporting progress through `ui`.
///
/// In dry-run mode the planned actions are printed and nothing is touched.
///
/// # Errors
///
/// Every failure is fatal: feed, download, extraction and verification.
pub(super) fn bootstrap_toolchain(
    ctx: &CommandContext,
    ui: &mut dyn UserInterface,
    dry_run: bool,
) -> Result<BootstrapReport> {
    let installer = ToolchainInstaller::new(ctx.toolchain(), ctx.profile())?;

    if dry_run {
        ui.show_header("Go toolchain (dry run)");
        let report = installer.plan()?;
        ui.message(&describe_versions(&report));
        for action in &report.planned {
            ui.message(&format!("  would {}", action));
        }
        return Ok(report);
    }

    ui.show_header("Go toolchain");

    let root = &ctx.toolchain().install_root;
    if !is_elevated() && !can_write_dir(root) {
        ui.warning(&format!(
            "{} is not writable; installing the toolchain may need elevated privileges",
            root.display()
        ));
    }

    let mut spinner = ui.start_spinner("Checking toolchain...");
    let report = match installer.bootstrap() {
        Ok(report) => report,
        Err(e) => {
            spinner.finish_error("Toolchain bootstrap failed");
            return Err(e);
        }
    };

    match report.initial {
        ToolchainState::UpToDate => {
            spinner.finish_skipped(&format!("Go {} already installed", report.desired.version))
        }
        _ => spinner.finish_success(&format!("Go {} installed", report.desired.version)),
    }

    if report.profile_lines_added > 0 {
        ui.message(&format!(
            "Added {} line(s) to {}",
            report.profile_lines_added,
            ctx.profile().display()
        ));
        ui.show_hint(&ctx.reload_hint());
    }

    Ok(report)
}

fn describe_versions(report: &BootstrapReport) -> String {
    let installed = report
        .previous
        .map(|v| v.to_string())
        .unwrap_or_else(|| "none".to_string());
    format!(
        "Installed: {}  Desired: {}  ({})",
        installed, report.desired.version, report.initial
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn pinned_config(temp: &TempDir) -> GlobalOptions {
        let path = temp.path().join("config.yml");
        fs::write(
            &path,
            format!(
                "toolchain:\n  version: \"1.22.0\"\n  install_root: {}\n  gopath: {}\n",
                temp.path().join("root").display(),
                temp.path().join("gopath").display()
            ),
        )
        .unwrap();
        GlobalOptions {
            config: Some(path),
            profile: Some(temp.path().join("rc")),
        }
    }

    #[test]
    fn dry_run_lists_profile_actions_and_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let options = pinned_config(&temp);
        let cmd = ToolchainCommand::new(&options, ToolchainArgs { dry_run: true });
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Desired: 1.22.0"));
        assert!(ui.has_message("would ensure"));
        assert!(!temp.path().join("rc").exists());
        assert!(!temp.path().join("root").exists());
    }

    #[test]
    fn missing_config_is_error() {
        let options = GlobalOptions {
            config: Some("/nonexistent/config.yml".into()),
            profile: None,
        };
        let cmd = ToolchainCommand::new(&options, ToolchainArgs::default());
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).is_err());
    }

    #[test]
    fn unreachable_feed_is_fatal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(
            &path,
            format!(
                "toolchain:\n  feed_url: http://127.0.0.1:1/dl\n  install_root: {}\n  timeout_secs: 2\n",
                temp.path().join("root").display()
            ),
        )
        .unwrap();
        let options = GlobalOptions {
            config: Some(path),
            profile: Some(temp.path().join("rc")),
        };
        let cmd = ToolchainCommand::new(&options, ToolchainArgs::default());
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();

        assert!(err.is_fatal());
        assert!(!temp.path().join("rc").exists());
    }
}
