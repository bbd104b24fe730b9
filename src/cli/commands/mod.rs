//! Subcommand implementations.
//!
//! [`CommandDispatcher`] loads the [`RunContext`] (merged config plus the
//! located interpreter) once and passes it to the selected [`Command`].

pub mod candidates;
pub mod check;
pub mod completions;
pub mod context;
pub mod dispatcher;
pub mod failed;

pub use context::{CheckParts, RunContext};
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
