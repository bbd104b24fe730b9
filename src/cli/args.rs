//! Command-line arguments.
//!
//! Running `pycheck` with no subcommand is the same as `pycheck check`, so
//! the check flags are accepted at the top level too.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::check::Scope;

/// pycheck - Sanity checks for a Python installation.
#[derive(Debug, Parser)]
#[command(name = "pycheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Python interpreter to inspect (overrides config and PATH search)
    #[arg(long, global = true, value_name = "PATH")]
    pub python: Option<PathBuf>,

    /// Path to config file (replaces .pycheck.yml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Hide progress spinners
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub check: CheckArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run checks and capability probes (default if no command specified)
    Check(CheckArgs),

    /// List names that fail to import
    Failed(ScopeArgs),

    /// List the names a check would try to import, without importing them
    Candidates(ScopeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Check standard-library modules (the default)
    #[arg(long)]
    pub os: bool,

    /// Check every installed package (can be slow)
    #[arg(long)]
    pub all: bool,

    /// Emit a JSON report instead of human-readable text
    #[arg(long)]
    pub json: bool,

    /// Treat capability warnings as failures
    #[arg(long)]
    pub strict: bool,
}

impl CheckArgs {
    /// Scopes to check, in order. No flag means `OS` only.
    pub fn scopes(&self) -> Vec<Scope> {
        let mut scopes = Vec::new();
        if self.os || !self.all {
            scopes.push(Scope::Os);
        }
        if self.all {
            scopes.push(Scope::All);
        }
        scopes
    }
}

/// Arguments for the `failed` and `candidates` commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ScopeArgs {
    /// Use installed packages instead of the standard library
    #[arg(long)]
    pub all: bool,
}

impl ScopeArgs {
    pub fn scope(&self) -> Scope {
        if self.all {
            Scope::All
        } else {
            Scope::Os
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
