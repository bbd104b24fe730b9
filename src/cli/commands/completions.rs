//! `pycheck completions <shell>`.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

pub struct CompletionsCommand {
    shell: Shell,
}

impl CompletionsCommand {
    pub fn new(shell: Shell) -> Self {
        Self { shell }
    }

    /// Write the completion script for this shell.
    pub fn write_to(&self, out: &mut dyn Write) {
        clap_complete::generate(self.shell, &mut Cli::command(), "pycheck", out);
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.write_to(&mut std::io::stdout());
        Ok(CommandResult::success())
    }
}
