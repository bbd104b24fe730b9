//! pycheck - Sanity checks for a Python installation.
//!
//! pycheck answers "is this interpreter healthy?" from the outside: it
//! tries to import every standard-library module, counts how many installed
//! packages import, and probes temporary storage and TLS. Every import runs
//! in its own child interpreter; package metadata is read from disk.
//!
//! # Modules
//!
//! - [`capability`] - Filesystem and TLS capability probes
//! - [`catalog`] - Sources of standard-library and installed-package names
//! - [`check`] - Scope checks and their outcomes
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and environment overrides
//! - [`discovery`] - Candidate name filtering, deduplication and ordering
//! - [`error`] - Error types and result aliases
//! - [`interpreter`] - Locating and running the inspected interpreter
//! - [`loader`] - Containment of single import attempts
//! - [`report`] - JSON report, sanitization and exit codes
//! - [`ui`] - Result lines, spinners and terminal output
//!
//! # Example
//!
//! ```
//! use pycheck::capability::{probe_filesystem_access, CapabilityStatus};
//!
//! let result = probe_filesystem_access();
//! assert_eq!(result.capability, "filesystem_access");
//! assert_eq!(result.status, CapabilityStatus::Ok);
//! ```
//!
//! For checks against fake catalogs, see [`check`] and the integration tests.

pub mod capability;
pub mod catalog;
pub mod check;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod interpreter;
pub mod loader;
pub mod report;
pub mod ui;

pub use error::{PycheckError, Result};
