//! The `pycheck candidates` command.
//!
//! Prints the names a check would try to import. Nothing is imported.

use crate::cli::args::ScopeArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::{CheckParts, RunContext};
use super::dispatcher::{Command, CommandResult};

/// The candidates command implementation.
pub struct CandidatesCommand<'a> {
    context: &'a RunContext,
    args: ScopeArgs,
}

impl<'a> CandidatesCommand<'a> {
    /// Create a new candidates command.
    pub fn new(context: &'a RunContext, args: ScopeArgs) -> Self {
        Self { context, args }
    }
}

impl Command for CandidatesCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let parts = CheckParts::new(self.context);
        let names = parts
            .checker(&self.context.config.skip)
            .candidates(self.args.scope())?;

        tracing::info!("{} candidates", names.len());
        for name in &names {
            ui.message(name);
        }

        Ok(CommandResult::success())
    }
}
