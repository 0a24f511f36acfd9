//! Tool catalog reconciliation.
//!
//! - [`reconciler`] runs the install and verify passes
//! - [`outcome`] holds per-tool results and the run summary
//! - [`fetch`] provides the production primitives (PATH lookup,
//!   `go install`, post-install commands)

pub mod fetch;
pub mod outcome;
pub mod reconciler;

pub use fetch::{is_present, run_inject, GoFetcher};
pub use outcome::{InstallOutcome, ReconcileSummary, ToolResult};
pub use reconciler::{PlannedTool, ReconcileContext, Reconciler};
