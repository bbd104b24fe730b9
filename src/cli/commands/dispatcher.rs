//! Routing from parsed arguments to a command.

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::report::{EXIT_FAILED, EXIT_OK};
use crate::ui::UserInterface;

use super::candidates::CandidatesCommand;
use super::check::CheckCommand;
use super::completions::CompletionsCommand;
use super::context::RunContext;
use super::failed::FailedCommand;

/// A runnable subcommand.
///
/// `Err` is reserved for setup problems; a check that finds a broken
/// installation still returns `Ok` with a failing exit code.
pub trait Command {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self { exit_code: EXIT_OK }
    }

    pub fn from_exit_code(exit_code: i32) -> Self {
        Self { exit_code }
    }

    /// [`EXIT_FAILED`] when `failed`, success otherwise.
    pub fn failed_if(failed: bool) -> Self {
        Self::from_exit_code(if failed { EXIT_FAILED } else { EXIT_OK })
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == EXIT_OK
    }
}

/// Resolves the run context and hands it to the selected command.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// `working_dir` is where `.pycheck.yml` is looked up.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Run the command selected on the command line.
    ///
    /// No subcommand means `check` with the top-level flags. Completions are
    /// generated without touching config or the interpreter.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Some(Commands::Completions(args)) = &cli.command {
            return CompletionsCommand::new(args.shell).execute(ui);
        }

        let context = RunContext::load(cli, &self.working_dir)?;
        match &cli.command {
            None => CheckCommand::new(&context, cli.check.clone()).execute(ui),
            Some(Commands::Check(args)) => CheckCommand::new(&context, args.clone()).execute(ui),
            Some(Commands::Failed(args)) => FailedCommand::new(&context, args.clone()).execute(ui),
            Some(Commands::Candidates(args)) => {
                CandidatesCommand::new(&context, args.clone()).execute(ui)
            }
            Some(Commands::Completions(_)) => Ok(CommandResult::success()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PycheckError;
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn exit_code_helpers() {
        assert!(CommandResult::success().is_success());
        assert!(!CommandResult::from_exit_code(2).is_success());
        assert_eq!(CommandResult::failed_if(true).exit_code, EXIT_FAILED);
        assert_eq!(CommandResult::failed_if(false), CommandResult::success());
    }

    #[test]
    fn missing_interpreter_is_a_setup_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let cli = Cli::parse_from(["pycheck", "--python", "/nonexistent/python3"]);
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let mut ui = MockUI::new();

        let err = dispatcher.dispatch(&cli, &mut ui).unwrap_err();
        assert!(matches!(err, PycheckError::InterpreterNotFound { .. }));
        assert!(ui.results().is_empty());
    }

    #[test]
    fn completions_need_no_interpreter() {
        let temp = tempfile::TempDir::new().unwrap();
        let cli = Cli::parse_from([
            "pycheck",
            "completions",
            "bash",
            "--python",
            "/nonexistent/python3",
        ]);
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let mut ui = MockUI::new();

        assert!(dispatcher.dispatch(&cli, &mut ui).unwrap().is_success());
    }
}
