//! Output mode.

/// How much besides results a run prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Spinners while sweeps run, then results.
    #[default]
    Normal,
    /// Results only.
    Quiet,
}

impl OutputMode {
    /// Mode for a run. Machine-readable output is always quiet.
    pub fn for_run(quiet: bool, json: bool) -> Self {
        if quiet || json {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub fn shows_spinners(&self) -> bool {
        *self == Self::Normal
    }
}
