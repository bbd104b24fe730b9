//! Result colors.

use console::Style;

/// Status of a result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Check passed or capability fully available.
    Success,
    /// Capability degraded.
    Warning,
    /// Check failed or capability unusable.
    Failed,
}

/// One style per status.
#[derive(Debug, Clone)]
pub struct Theme {
    pub success: Style,
    pub warning: Style,
    pub failed: Style,
}

impl Theme {
    /// Green, orange and bold red.
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            failed: Style::new().red().bold(),
        }
    }

    /// No styling at all (non-TTY or `--no-color`).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            failed: Style::new(),
        }
    }

    /// Style `msg` for `kind`. The text itself is never changed.
    pub fn paint(&self, kind: StatusKind, msg: &str) -> String {
        let style = match kind {
            StatusKind::Success => &self.success,
            StatusKind::Warning => &self.warning,
            StatusKind::Failed => &self.failed,
        };
        style.apply_to(msg).to_string()
    }
}

/// Whether output should be colored.
///
/// `--no-color` and `NO_COLOR` (https://no-color.org/) both turn it off, as
/// does a stdout that is not a terminal.
pub fn colors_enabled(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().is_term()
}
