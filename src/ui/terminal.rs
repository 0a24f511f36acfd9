//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::reconcile::ReconcileSummary;

use super::{
    render_summary, should_use_colors, NonInteractiveUI, OutputMode, ProgressSpinner,
    SpinnerHandle, ToolstrapTheme, UserInterface,
};

/// Colored output with animated spinners, for a TTY.
pub struct TerminalUI {
    term: Term,
    theme: ToolstrapTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            ToolstrapTheme::new()
        } else {
            ToolstrapTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }

    /// Write a line unless the mode is silent.
    fn status_line(&self, line: &str) {
        if self.mode.shows_status() {
            self.write_line(line);
        }
    }

    fn write_line(&self, line: &str) {
        // A closed stdout isn't worth failing a run over.
        let _ = writeln!(&self.term, "{}", line);
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.status_line(msg);
    }

    fn success(&mut self, msg: &str) {
        self.status_line(&self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        self.status_line(&self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        self.write_line(&self.theme.format_error(msg));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let spinner = if self.mode.shows_spinners() {
            ProgressSpinner::new(message, self.theme.clone())
        } else {
            ProgressSpinner::hidden()
        };
        Box::new(spinner)
    }

    fn show_header(&mut self, title: &str) {
        self.status_line(&format!("\n{}\n", self.theme.format_header(title)));
    }

    fn show_hint(&mut self, hint: &str) {
        self.status_line(&format!("  {}", self.theme.hint.apply_to(hint)));
    }

    fn show_summary(&mut self, summary: &ReconcileSummary) {
        self.status_line("");
        for line in render_summary(summary, &self.theme) {
            self.status_line(&line);
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// A [`TerminalUI`] when `interactive` and stdout is a TTY, otherwise a
/// [`NonInteractiveUI`].
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
