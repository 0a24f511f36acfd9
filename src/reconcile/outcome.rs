//! Per-tool outcomes and the run summary.

use crate::catalog::ToolDescriptor;
use serde::Serialize;

/// What happened to one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallOutcome {
    /// Executable was already on PATH; nothing was fetched.
    AlreadyPresent,
    /// Fetched successfully (and its post-install command, if any, succeeded).
    InstalledOk,
    /// Fetched successfully but the post-install command failed.
    InjectFailed,
    /// The package fetch failed.
    InstallFailed,
    /// Still not resolvable after the install pass.
    VerifyFailed,
}

impl InstallOutcome {
    /// Whether this outcome makes the run exit non-zero.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::InstallFailed | Self::VerifyFailed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AlreadyPresent => "already present",
            Self::InstalledOk => "installed",
            Self::InjectFailed => "installed, post-install failed",
            Self::InstallFailed => "install failed",
            Self::VerifyFailed => "not found after install",
        }
    }
}

impl std::fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    pub tool: ToolDescriptor,
    pub outcome: InstallOutcome,
    /// One-line failure detail, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ToolResult {
    pub fn new(tool: &ToolDescriptor, outcome: InstallOutcome) -> Self {
        Self {
            tool: tool.clone(),
            outcome,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Install-pass results plus the executables the verify pass missed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileSummary {
    pub results: Vec<ToolResult>,
    pub unverified: Vec<String>,
}

impl ReconcileSummary {
    pub fn new(results: Vec<ToolResult>, unverified: Vec<String>) -> Self {
        Self {
            results,
            unverified,
        }
    }

    /// Number of results with the given outcome.
    pub fn count(&self, outcome: InstallOutcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Whether `executable` was missing in the verify pass.
    pub fn is_unverified(&self, executable: &str) -> bool {
        self.unverified.iter().any(|e| e == executable)
    }

    /// Outcome to report for `result` once the verify pass is folded in.
    ///
    /// A fetch failure stays `InstallFailed`; anything else that the verify
    /// pass couldn't find becomes `VerifyFailed`.
    pub fn reported_outcome(&self, result: &ToolResult) -> InstallOutcome {
        if result.outcome != InstallOutcome::InstallFailed
            && self.is_unverified(&result.tool.executable)
        {
            InstallOutcome::VerifyFailed
        } else {
            result.outcome
        }
    }

    /// Any install or verify failure.
    pub fn has_failures(&self) -> bool {
        !self.unverified.is_empty() || self.results.iter().any(|r| r.outcome.is_failure())
    }

    /// Process exit status for this run.
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }

    /// Results whose post-install command failed.
    pub fn inject_failures(&self) -> impl Iterator<Item = &ToolResult> {
        self.results
            .iter()
            .filter(|r| r.outcome == InstallOutcome::InjectFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(exe: &str) -> ToolDescriptor {
        ToolDescriptor::new(exe, exe, &format!("example.com/{}", exe))
    }

    #[test]
    fn failure_outcomes() {
        assert!(InstallOutcome::InstallFailed.is_failure());
        assert!(InstallOutcome::VerifyFailed.is_failure());
        assert!(!InstallOutcome::InjectFailed.is_failure());
        assert!(!InstallOutcome::AlreadyPresent.is_failure());
        assert!(!InstallOutcome::InstalledOk.is_failure());
    }

    #[test]
    fn clean_summary_exits_zero() {
        let summary = ReconcileSummary::new(
            vec![
                ToolResult::new(&tool("a"), InstallOutcome::AlreadyPresent),
                ToolResult::new(&tool("b"), InstallOutcome::InstalledOk),
            ],
            vec![],
        );
        assert!(!summary.has_failures());
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(summary.count(InstallOutcome::InstalledOk), 1);
    }

    #[test]
    fn inject_failure_does_not_fail_run() {
        let summary = ReconcileSummary::new(
            vec![ToolResult::new(&tool("nuclei"), InstallOutcome::InjectFailed)
                .with_detail("templates update failed")],
            vec![],
        );
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(summary.inject_failures().count(), 1);
    }

    #[test]
    fn install_failure_exits_one() {
        let summary = ReconcileSummary::new(
            vec![ToolResult::new(&tool("a"), InstallOutcome::InstallFailed)],
            vec!["a".to_string()],
        );
        assert_eq!(summary.exit_code(), 1);
        assert!(summary.is_unverified("a"));
    }

    #[test]
    fn unverified_alone_exits_one() {
        let summary = ReconcileSummary::new(
            vec![ToolResult::new(&tool("a"), InstallOutcome::InstalledOk)],
            vec!["a".to_string()],
        );
        assert!(summary.has_failures());
    }

    #[test]
    fn reported_outcome_folds_in_verify_pass() {
        let summary = ReconcileSummary::new(
            vec![
                ToolResult::new(&tool("a"), InstallOutcome::InstallFailed),
                ToolResult::new(&tool("b"), InstallOutcome::InstalledOk),
                ToolResult::new(&tool("c"), InstallOutcome::InstalledOk),
            ],
            vec!["a".to_string(), "b".to_string()],
        );
        let reported: Vec<InstallOutcome> = summary
            .results
            .iter()
            .map(|r| summary.reported_outcome(r))
            .collect();
        assert_eq!(
            reported,
            vec![
                InstallOutcome::InstallFailed,
                InstallOutcome::VerifyFailed,
                InstallOutcome::InstalledOk
            ]
        );
    }

    #[test]
    fn empty_summary_is_clean() {
        assert_eq!(ReconcileSummary::default().exit_code(), 0);
    }

    #[test]
    fn serializes_outcomes_as_snake_case() {
        let json = serde_json::to_string(&InstallOutcome::AlreadyPresent).unwrap();
        assert_eq!(json, "\"already_present\"");
    }
}
