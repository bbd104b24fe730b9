//! The real terminal.

use console::Term;
use std::io::Write;

use super::{
    colors_enabled, OutputMode, ProgressSpinner, SpinnerHandle, StatusKind, Theme, UserInterface,
};

/// Console output, styled when stdout is a terminal.
pub struct ConsoleUI {
    stdout: Term,
    theme: Theme,
    spinners: bool,
}

impl ConsoleUI {
    pub fn new(mode: OutputMode, no_color: bool) -> Self {
        let stdout = Term::stdout();
        let theme = if colors_enabled(no_color) {
            Theme::colored()
        } else {
            Theme::plain()
        };

        Self {
            // spinners draw on stderr
            spinners: mode.shows_spinners() && Term::stderr().is_term(),
            stdout,
            theme,
        }
    }
}

impl UserInterface for ConsoleUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.stdout, "{}", msg).ok();
    }

    fn result_line(&mut self, kind: StatusKind, msg: &str) {
        writeln!(self.stdout, "{}", self.theme.paint(kind, msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.paint(StatusKind::Failed, msg));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.spinners {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }
}

/// Build the console UI for a run.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    Box::new(ConsoleUI::new(mode, no_color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_mode_never_spins() {
        let ui = ConsoleUI::new(OutputMode::Quiet, true);
        assert!(!ui.spinners);
    }

    #[test]
    fn no_color_uses_plain_theme() {
        let ui = ConsoleUI::new(OutputMode::Normal, true);
        assert_eq!(ui.theme.paint(StatusKind::Failed, "OS: FAILED"), "OS: FAILED");
    }
}
