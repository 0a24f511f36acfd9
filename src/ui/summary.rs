//! Reconcile summary rendering.

use crate::reconcile::{InstallOutcome, ReconcileSummary};

use super::theme::ToolstrapTheme;

/// One-line tally, e.g. `12 present · 3 installed · 1 failed`.
pub fn summary_tally(summary: &ReconcileSummary) -> String {
    let present = summary.count(InstallOutcome::AlreadyPresent);
    let installed =
        summary.count(InstallOutcome::InstalledOk) + summary.count(InstallOutcome::InjectFailed);
    let failed = summary
        .results
        .iter()
        .filter(|r| summary.reported_outcome(r).is_failure())
        .count();

    format!(
        "{} present · {} installed · {} failed",
        present, installed, failed
    )
}

/// Render the summary box, one string per output line.
pub fn render_summary(summary: &ReconcileSummary, theme: &ToolstrapTheme) -> Vec<String> {
    let b = &theme.border;
    let mut lines = Vec::new();

    lines.push(format!(
        "  {} {}",
        b.apply_to("┌─"),
        b.apply_to("Summary ──────────────────────────")
    ));

    let width = summary
        .results
        .iter()
        .map(|r| r.tool.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(12);

    for result in &summary.results {
        let outcome = summary.reported_outcome(result);
        let detail = match (&result.detail, outcome) {
            (Some(d), InstallOutcome::InstallFailed | InstallOutcome::InjectFailed) => {
                format!("{} · {}", outcome.label(), d)
            }
            _ => outcome.label().to_string(),
        };
        lines.push(format!(
            "  {} {} {:<width$} {}",
            b.apply_to("│"),
            theme.outcome_icon(outcome),
            result.tool.name,
            theme.dim.apply_to(detail),
            width = width
        ));
    }

    lines.push(format!(
        "  {}",
        b.apply_to("├────────────────────────────────────")
    ));
    lines.push(format!("  {} {}", b.apply_to("│"), summary_tally(summary)));
    if !summary.unverified.is_empty() {
        lines.push(format!(
            "  {} {}",
            b.apply_to("│"),
            theme.error.apply_to(format!(
                "Missing after install: {}",
                summary.unverified.join(", ")
            ))
        ));
    }
    lines.push(format!(
        "  {}",
        b.apply_to("└────────────────────────────────────")
    ));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ToolDescriptor;
    use crate::reconcile::ToolResult;

    fn summary() -> ReconcileSummary {
        let alpha = ToolDescriptor::new("Alpha", "alpha", "example.com/alpha");
        let beta = ToolDescriptor::new("Beta", "beta", "example.com/beta");
        ReconcileSummary::new(
            vec![
                ToolResult::new(&alpha, InstallOutcome::AlreadyPresent),
                ToolResult::new(&beta, InstallOutcome::InstallFailed).with_detail("exit 1"),
            ],
            vec!["beta".to_string()],
        )
    }

    #[test]
    fn tally_counts_outcomes() {
        assert_eq!(
            summary_tally(&summary()),
            "1 present · 0 installed · 1 failed"
        );
    }

    #[test]
    fn render_lists_each_tool_and_missing() {
        let lines = render_summary(&summary(), &ToolstrapTheme::plain());
        let text = lines.join("\n");

        assert!(text.contains("○ Alpha"));
        assert!(text.contains("✗ Beta"));
        assert!(text.contains("install failed · exit 1"));
        assert!(text.contains("Missing after install: beta"));
    }

    #[test]
    fn render_empty_summary() {
        let lines = render_summary(&ReconcileSummary::default(), &ToolstrapTheme::plain());
        assert!(lines.iter().any(|l| l.contains("0 present")));
        assert!(!lines.iter().any(|l| l.contains("Missing")));
    }
}
