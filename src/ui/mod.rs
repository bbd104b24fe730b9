//! Terminal output.
//!
//! Results and name listings go to stdout; errors, logs and spinners go to
//! stderr, so piping `pycheck --json` or `pycheck failed` only ever captures
//! the results.
//!
//! # Example
//!
//! ```
//! use pycheck::ui::{create_ui, OutputMode, StatusKind};
//!
//! let mut ui = create_ui(OutputMode::Quiet, true);
//! ui.result_line(StatusKind::Success, "OS: OK");
//! ```

pub mod mock;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, ConsoleUI};
pub use theme::{colors_enabled, StatusKind, Theme};

/// Where commands send their output. Mocked in tests.
pub trait UserInterface {
    /// Write a line to stdout verbatim.
    fn message(&mut self, msg: &str);

    /// Write one result line, styled by its status.
    fn result_line(&mut self, kind: StatusKind, msg: &str);

    /// Report an error on stderr.
    fn error(&mut self, msg: &str);

    /// Show a spinner while a sweep runs.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// A running spinner.
pub trait SpinnerHandle {
    /// Remove the spinner from the terminal.
    fn finish_and_clear(&mut self);
}
