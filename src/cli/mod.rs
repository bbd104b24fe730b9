//! The `pycheck` command line.
//!
//! - [`args`] - clap definitions
//! - [`commands`] - what each subcommand does

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, ScopeArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, RunContext};
