//! Recording UI for tests.
//!
//! `MockUI` keeps every call as a [`UiEvent`] in order, so tests can check
//! both what was shown and in which sequence.
//!
//! ```
//! use toolstrap::ui::{MockUI, UiEvent, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Bootstrapping toolchain");
//! ui.success("Done!");
//!
//! assert!(ui.has_message("Bootstrapping"));
//! assert_eq!(ui.successes(), vec!["Done!"]);
//! assert_eq!(ui.events()[1], UiEvent::Success("Done!".to_string()));
//! ```

use crate::reconcile::ReconcileSummary;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// One recorded UI call.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Message(String),
    Success(String),
    Warning(String),
    Error(String),
    Header(String),
    Hint(String),
    /// A spinner was started with this message.
    Spinner(String),
    /// Index into [`MockUI::summaries`].
    Summary(usize),
}

/// UI that records instead of printing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    events: Vec<UiEvent>,
    summaries: Vec<ReconcileSummary>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Every recorded call, oldest first.
    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    /// Summaries passed to `show_summary`.
    pub fn summaries(&self) -> &[ReconcileSummary] {
        &self.summaries
    }

    fn texts(&self, pick: fn(&UiEvent) -> Option<&String>) -> Vec<&str> {
        self.events.iter().filter_map(pick).map(String::as_str).collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.texts(|e| match e {
            UiEvent::Message(s) => Some(s),
            _ => None,
        })
    }

    pub fn successes(&self) -> Vec<&str> {
        self.texts(|e| match e {
            UiEvent::Success(s) => Some(s),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.texts(|e| match e {
            UiEvent::Warning(s) => Some(s),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<&str> {
        self.texts(|e| match e {
            UiEvent::Error(s) => Some(s),
            _ => None,
        })
    }

    pub fn headers(&self) -> Vec<&str> {
        self.texts(|e| match e {
            UiEvent::Header(s) => Some(s),
            _ => None,
        })
    }

    pub fn hints(&self) -> Vec<&str> {
        self.texts(|e| match e {
            UiEvent::Hint(s) => Some(s),
            _ => None,
        })
    }

    /// Messages spinners were started with.
    pub fn spinners(&self) -> Vec<&str> {
        self.texts(|e| match e {
            UiEvent::Spinner(s) => Some(s),
            _ => None,
        })
    }

    pub fn has_message(&self, text: &str) -> bool {
        self.messages().iter().any(|m| m.contains(text))
    }

    pub fn has_success(&self, text: &str) -> bool {
        self.successes().iter().any(|m| m.contains(text))
    }

    pub fn has_warning(&self, text: &str) -> bool {
        self.warnings().iter().any(|m| m.contains(text))
    }

    pub fn has_error(&self, text: &str) -> bool {
        self.errors().iter().any(|m| m.contains(text))
    }

    pub fn has_hint(&self, text: &str) -> bool {
        self.hints().iter().any(|m| m.contains(text))
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
        self.summaries.clear();
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.events.push(UiEvent::Message(msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.events.push(UiEvent::Success(msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.events.push(UiEvent::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.events.push(UiEvent::Error(msg.to_string()));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.events.push(UiEvent::Spinner(message.to_string()));
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.events.push(UiEvent::Header(title.to_string()));
    }

    fn show_hint(&mut self, hint: &str) {
        self.events.push(UiEvent::Hint(hint.to_string()));
    }

    fn show_summary(&mut self, summary: &ReconcileSummary) {
        self.events.push(UiEvent::Summary(self.summaries.len()));
        self.summaries.push(summary.clone());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner that remembers how it finished.
#[derive(Debug, Default)]
pub struct MockSpinner {
    updates: Vec<String>,
    finished: Option<(SpinnerStatus, String)>,
}

/// How a [`MockSpinner`] finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Error,
    Skipped,
}

impl MockSpinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages set while spinning.
    pub fn updates(&self) -> &[String] {
        &self.updates
    }

    pub fn status(&self) -> Option<SpinnerStatus> {
        self.finished.as_ref().map(|(status, _)| *status)
    }

    pub fn finish_message(&self) -> Option<&str> {
        self.finished.as_ref().map(|(_, msg)| msg.as_str())
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.updates.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finished = Some((SpinnerStatus::Success, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.finished = Some((SpinnerStatus::Error, msg.to_string()));
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.finished = Some((SpinnerStatus::Skipped, msg.to_string()));
    }
}
