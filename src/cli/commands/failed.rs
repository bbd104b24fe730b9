//! The `pycheck failed` command.
//!
//! Lists every candidate that does not import, one per line. Unlike `check`,
//! an `OS` run keeps going after the first failure.

use crate::cli::args::ScopeArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::{CheckParts, RunContext};
use super::dispatcher::{Command, CommandResult};

/// The failed command implementation.
pub struct FailedCommand<'a> {
    context: &'a RunContext,
    args: ScopeArgs,
}

impl<'a> FailedCommand<'a> {
    /// Create a new failed command.
    pub fn new(context: &'a RunContext, args: ScopeArgs) -> Self {
        Self { context, args }
    }
}

impl Command for FailedCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let parts = CheckParts::new(self.context);
        let checker = parts.checker(&self.context.config.skip);

        let mut spinner = ui.start_spinner("Importing candidates...");
        let failed = checker.list_failed(self.args.scope());
        spinner.finish_and_clear();
        let failed = failed?;

        for name in &failed {
            ui.message(name);
        }

        Ok(CommandResult::failed_if(!failed.is_empty()))
    }
}
