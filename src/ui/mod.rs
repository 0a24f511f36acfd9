//! Terminal output.
//!
//! Everything user-facing goes through [`UserInterface`]. There are three
//! implementations: [`TerminalUI`] (colors, animated spinners) for a TTY,
//! [`NonInteractiveUI`] (plain lines) for CI and pipes, and [`MockUI`],
//! which records calls for tests.
//!
//! ```
//! use toolstrap::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("toolstrap");
//! ui.success("Toolchain ready");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod summary;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus, UiEvent};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use summary::{render_summary, summary_tally};
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ToolstrapTheme};

use crate::reconcile::ReconcileSummary;

/// Output sink for commands and the reconciler.
pub trait UserInterface {
    fn output_mode(&self) -> OutputMode;

    /// Plain informational line.
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Begin a long-running step. The handle reports how it ended.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Section title.
    fn show_header(&mut self, title: &str);

    /// Follow-up advice, e.g. how to reload the shell profile.
    fn show_hint(&mut self, hint: &str);

    /// Per-tool outcome table printed after reconciliation.
    fn show_summary(&mut self, summary: &ReconcileSummary);

    fn is_interactive(&self) -> bool;
}

/// A running step started by [`UserInterface::start_spinner`].
pub trait SpinnerHandle {
    fn set_message(&mut self, msg: &str);

    fn finish_success(&mut self, msg: &str);

    fn finish_error(&mut self, msg: &str);

    /// Nothing needed doing.
    fn finish_skipped(&mut self, msg: &str);
}
