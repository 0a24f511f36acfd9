//! Catalog reconciliation.
//!
//! One pass over the catalog in order: skip what is already on PATH, fetch
//! what isn't, run post-install commands. A failed entry never stops the
//! pass. A second pass then re-checks every executable without installing
//! anything.

use crate::catalog::{Catalog, ToolDescriptor};
use crate::error::Result;
use crate::reconcile::outcome::{InstallOutcome, ReconcileSummary, ToolResult};
use crate::ui::UserInterface;

/// External operations the reconciler depends on.
///
/// Production code wires in the primitives from [`crate::reconcile::fetch`]
/// (PATH lookup, `go install`, `sh -c`); tests substitute their own.
pub struct ReconcileContext<'a> {
    /// Whether an executable resolves on the current PATH.
    pub is_present: &'a dyn Fn(&str) -> bool,
    /// Fetch and install a tool.
    pub fetch: &'a dyn Fn(&ToolDescriptor) -> Result<()>,
    /// Run a tool's post-install command.
    pub run_inject: &'a dyn Fn(&ToolDescriptor, &str) -> Result<()>,
}

/// A catalog entry and whether it would be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTool<'c> {
    pub tool: &'c ToolDescriptor,
    pub present: bool,
}

/// Reconciles a catalog against the executables on PATH.
pub struct Reconciler<'a> {
    ctx: ReconcileContext<'a>,
}

impl<'a> Reconciler<'a> {
    pub fn new(ctx: ReconcileContext<'a>) -> Self {
        Self { ctx }
    }

    /// Reconcile a single entry.
    pub fn reconcile_tool(&self, tool: &ToolDescriptor) -> ToolResult {
        if (self.ctx.is_present)(&tool.executable) {
            tracing::debug!("{} already present", tool.executable);
            return ToolResult::new(tool, InstallOutcome::AlreadyPresent);
        }

        if let Err(e) = (self.ctx.fetch)(tool) {
            tracing::warn!("{}", e);
            return ToolResult::new(tool, InstallOutcome::InstallFailed).with_detail(e.to_string());
        }

        match tool.inject.as_deref() {
            Some(command) => match (self.ctx.run_inject)(tool, command) {
                Ok(()) => ToolResult::new(tool, InstallOutcome::InstalledOk),
                Err(e) => {
                    tracing::warn!("{}", e);
                    ToolResult::new(tool, InstallOutcome::InjectFailed).with_detail(e.to_string())
                }
            },
            None => ToolResult::new(tool, InstallOutcome::InstalledOk),
        }
    }

    /// Install pass. One result per entry, in catalog order.
    pub fn reconcile(&self, catalog: &Catalog, ui: &mut dyn UserInterface) -> Vec<ToolResult> {
        let total = catalog.len();
        let mut results = Vec::with_capacity(total);

        for (index, tool) in catalog.iter().enumerate() {
            let mut spinner =
                ui.start_spinner(&format!("[{}/{}] {}", index + 1, total, tool.name));
            let result = self.reconcile_tool(tool);

            match result.outcome {
                InstallOutcome::AlreadyPresent => {
                    spinner.finish_skipped(&format!("{} already present", tool.name))
                }
                InstallOutcome::InstalledOk => {
                    spinner.finish_success(&format!("{} installed", tool.name))
                }
                InstallOutcome::InjectFailed => {
                    spinner.finish_success(&format!("{} installed", tool.name));
                    ui.warning(&format!(
                        "{}: {}",
                        tool.name,
                        result.detail.as_deref().unwrap_or("post-install command failed")
                    ));
                }
                InstallOutcome::InstallFailed | InstallOutcome::VerifyFailed => {
                    spinner.finish_error(&format!(
                        "{} failed: {}",
                        tool.name,
                        result.detail.as_deref().unwrap_or("unknown error")
                    ))
                }
            }

            results.push(result);
        }

        results
    }

    /// Verify pass. Executables still missing, in catalog order.
    pub fn verify(&self, catalog: &Catalog) -> Vec<String> {
        catalog
            .iter()
            .filter(|tool| !(self.ctx.is_present)(&tool.executable))
            .map(|tool| {
                tracing::warn!("{} not found after install pass", tool.executable);
                tool.executable.clone()
            })
            .collect()
    }

    /// Install pass followed by verify pass.
    pub fn run(&self, catalog: &Catalog, ui: &mut dyn UserInterface) -> ReconcileSummary {
        let results = self.reconcile(catalog, ui);
        let unverified = self.verify(catalog);
        ReconcileSummary::new(results, unverified)
    }

    /// Which entries would be fetched, without fetching anything.
    pub fn plan<'c>(&self, catalog: &'c Catalog) -> Vec<PlannedTool<'c>> {
        catalog
            .iter()
            .map(|tool| PlannedTool {
                tool,
                present: (self.ctx.is_present)(&tool.executable),
            })
            .collect()
    }
}
