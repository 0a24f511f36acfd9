//! Visual theme and styling.

use console::Style;

use crate::reconcile::InstallOutcome;

/// Styles shared by the terminal UI, spinners and the summary box.
///
/// [`ToolstrapTheme::plain`] renders the same text without escapes, which is
/// what tests and piped output see.
#[derive(Debug, Clone)]
pub struct ToolstrapTheme {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    /// Secondary text: skipped steps, outcome details.
    pub dim: Style,
    pub header: Style,
    pub title: Style,
    /// Box-drawing characters.
    pub border: Style,
    pub hint: Style,
}

impl Default for ToolstrapTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolstrapTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().cyan().bold(),
            title: Style::new().bold(),
            border: Style::new().dim(),
            hint: Style::new().cyan().dim(),
        }
    }

    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            success: none.clone(),
            warning: none.clone(),
            error: none.clone(),
            dim: none.clone(),
            header: none.clone(),
            title: none.clone(),
            border: none.clone(),
            hint: none,
        }
    }

    fn iconed(style: &Style, icon: &str, msg: &str) -> String {
        style.apply_to(format!("{} {}", icon, msg)).to_string()
    }

    pub fn format_success(&self, msg: &str) -> String {
        Self::iconed(&self.success, "✓", msg)
    }

    pub fn format_warning(&self, msg: &str) -> String {
        Self::iconed(&self.warning, "⚠", msg)
    }

    pub fn format_error(&self, msg: &str) -> String {
        Self::iconed(&self.error, "✗", msg)
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        Self::iconed(&self.dim, "○", msg)
    }

    /// `▶ title`
    pub fn format_header(&self, title: &str) -> String {
        format!("{} {}", self.header.apply_to("▶"), self.title.apply_to(title))
    }

    /// Icon for a tool's row in the summary box.
    pub fn outcome_icon(&self, outcome: InstallOutcome) -> String {
        let (icon, style) = match outcome {
            InstallOutcome::AlreadyPresent => ("○", &self.dim),
            InstallOutcome::InstalledOk => ("✓", &self.success),
            InstallOutcome::InjectFailed => ("⚠", &self.warning),
            InstallOutcome::InstallFailed | InstallOutcome::VerifyFailed => ("✗", &self.error),
        };
        style.apply_to(icon).to_string()
    }
}

/// Colors are used on a TTY unless `NO_COLOR` is set.
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().is_term()
}
