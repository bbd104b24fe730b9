//! Sources of candidate module names.
//!
//! Discovery never talks to the interpreter or the filesystem directly; it
//! goes through the two catalog traits defined here. The real
//! implementations read the target interpreter's installation, and tests
//! substitute fakes that return errors, panic, or yield corrupted metadata.
//!
//! # Modules
//!
//! - [`stdlib`] - Standard-library enumeration with a directory-scan fallback
//! - [`site_packages`] - Installed distributions from `*.dist-info` / `*.egg-info`

pub mod site_packages;
pub mod stdlib;

pub use site_packages::{DistInfo, SitePackagesCatalog};
pub use stdlib::{scan_stdlib_dir, InterpreterStdlib};

use crate::error::Result;

/// Enumerates the names of a runtime's standard library.
pub trait StandardLibraryCatalog {
    /// Every standard-library module name the runtime knows about.
    ///
    /// Names are returned unfiltered; private names and skip-listed names are
    /// removed by discovery.
    fn module_names(&self) -> Result<Vec<String>>;
}

/// A boxed stream of distributions, where each item may itself be broken.
pub type DistributionIter<'a> = Box<dyn Iterator<Item = Result<Box<dyn Distribution>>> + 'a>;

/// Enumerates installed third-party distributions.
pub trait InstalledDistributionCatalog {
    /// Start iterating installed distributions.
    ///
    /// An `Err` item stands for a single distribution whose metadata could not
    /// be opened; iteration continues past it.
    fn distributions(&self) -> Result<DistributionIter<'_>>;
}

/// Package metadata of one installed distribution.
pub trait Distribution {
    /// Declared distribution name (`Name:` metadata header), if any.
    fn name(&self) -> Result<Option<String>>;

    /// Contents of a metadata file such as `top_level.txt`, if present.
    fn read_text(&self, file: &str) -> Result<Option<String>>;

    /// Installed file paths relative to the install root, if recorded.
    fn files(&self) -> Result<Option<Vec<String>>>;
}
