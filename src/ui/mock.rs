//! Recording UI for command tests.
//!
//! ```
//! use pycheck::ui::{MockUI, StatusKind, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.result_line(StatusKind::Failed, "OS: FAILED");
//! ui.message("json");
//!
//! assert_eq!(ui.results()[0].1, "OS: FAILED");
//! assert_eq!(ui.messages(), ["json"]);
//! ```

use super::{SpinnerHandle, StatusKind, UserInterface};

/// Captures everything a command writes.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    results: Vec<(StatusKind, String)>,
    errors: Vec<String>,
    spinners: Vec<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written with `message`.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Result lines with their status, in order.
    pub fn results(&self) -> &[(StatusKind, String)] {
        &self.results
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Messages of every spinner started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn result_line(&mut self, kind: StatusKind, msg: &str) {
        self.results.push((kind, msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::default())
    }
}

/// Spinner that does nothing but remember it was finished.
#[derive(Debug, Default)]
pub struct MockSpinner {
    pub finished: bool,
}

impl SpinnerHandle for MockSpinner {
    fn finish_and_clear(&mut self) {
        self.finished = true;
    }
}
