//! Scope checks: discovery plus loading, reduced to one outcome.
//!
//! # Example
//!
//! ```
//! use pycheck::catalog::{DistributionIter, InstalledDistributionCatalog, StandardLibraryCatalog};
//! use pycheck::check::{CheckOutcome, Checker, Scope};
//! use pycheck::loader::{LoadError, ModuleLoader};
//!
//! struct Stdlib;
//! impl StandardLibraryCatalog for Stdlib {
//!     fn module_names(&self) -> pycheck::Result<Vec<String>> {
//!         Ok(vec!["json".into(), "os".into()])
//!     }
//! }
//!
//! struct NoPackages;
//! impl InstalledDistributionCatalog for NoPackages {
//!     fn distributions(&self) -> pycheck::Result<DistributionIter<'_>> {
//!         Ok(Box::new(std::iter::empty()))
//!     }
//! }
//!
//! struct AlwaysLoads;
//! impl ModuleLoader for AlwaysLoads {
//!     fn load(&self, _name: &str) -> Result<bool, LoadError> {
//!         Ok(true)
//!     }
//! }
//!
//! let checker = Checker::new(&Stdlib, &NoPackages, &AlwaysLoads);
//! let scope: Scope = "OS".parse().unwrap();
//! assert_eq!(checker.check(scope).unwrap(), CheckOutcome::Intact);
//! assert_eq!(checker.check(Scope::All).unwrap(), CheckOutcome::NonePassed);
//! ```

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::catalog::{InstalledDistributionCatalog, StandardLibraryCatalog};
use crate::discovery::{list_all_candidates, list_os_candidates};
use crate::error::{PycheckError, Result};
use crate::loader::{try_load, ModuleLoader};

/// Which set of candidates a check evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Standard-library modules only.
    Os,
    /// Every top-level name of every installed distribution.
    All,
    /// Reserved. Accepted by the parser, rejected by every check.
    Specific,
}

impl Scope {
    /// The token this scope is written as.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Os => "OS",
            Self::All => "ALL",
            Self::Specific => "SPECIFIC",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = PycheckError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "OS" => Ok(Self::Os),
            "ALL" => Ok(Self::All),
            "SPECIFIC" => Ok(Self::Specific),
            other => Err(PycheckError::InvalidScope {
                scope: other.to_string(),
            }),
        }
    }
}

/// Result of one scope check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// `OS`: every standard-library candidate loaded.
    Intact,
    /// `OS`: at least one standard-library candidate failed.
    Broken,
    /// `ALL`: this many candidates loaded.
    Passed(NonZeroUsize),
    /// `ALL`: not a single candidate loaded.
    NonePassed,
}

impl CheckOutcome {
    /// Whether the outcome counts as passing.
    ///
    /// Any positive `ALL` count passes; zero does not.
    pub fn is_passing(&self) -> bool {
        matches!(self, Self::Intact | Self::Passed(_))
    }

    /// The `ALL` success count as a numeric string, e.g. `"142"`.
    pub fn libraries_passed(&self) -> Option<String> {
        match self {
            Self::Passed(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn from_count(passed: usize) -> Self {
        NonZeroUsize::new(passed).map_or(Self::NonePassed, Self::Passed)
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intact => f.write_str("OK"),
            Self::Passed(n) => write!(f, "{} libraries passed", n),
            Self::Broken | Self::NonePassed => f.write_str("FAILED"),
        }
    }
}

/// Runs scope checks against a pair of catalogs and a loader.
pub struct Checker<'a> {
    stdlib: &'a dyn StandardLibraryCatalog,
    installed: &'a dyn InstalledDistributionCatalog,
    loader: &'a dyn ModuleLoader,
    extra_skip: Vec<String>,
}

impl<'a> Checker<'a> {
    /// Create a checker.
    pub fn new(
        stdlib: &'a dyn StandardLibraryCatalog,
        installed: &'a dyn InstalledDistributionCatalog,
        loader: &'a dyn ModuleLoader,
    ) -> Self {
        Self {
            stdlib,
            installed,
            loader,
            extra_skip: Vec::new(),
        }
    }

    /// Exclude additional standard-library names from `OS` checks.
    pub fn with_extra_skip(mut self, names: Vec<String>) -> Self {
        self.extra_skip = names;
        self
    }

    /// Candidate names for a scope, in the order they will be loaded.
    pub fn candidates(&self, scope: Scope) -> Result<Vec<String>> {
        match scope {
            Scope::Os => Ok(list_os_candidates(self.stdlib, &self.extra_skip)),
            Scope::All => Ok(list_all_candidates(self.installed)),
            Scope::Specific => Err(PycheckError::InvalidScope {
                scope: scope.to_string(),
            }),
        }
    }

    /// Check a scope.
    ///
    /// `OS` stops at the first candidate that fails to load. `ALL` always
    /// tries every candidate and counts the successes.
    pub fn check(&self, scope: Scope) -> Result<CheckOutcome> {
        let candidates = self.candidates(scope)?;
        tracing::debug!("{} scope: {} candidates", scope, candidates.len());

        match scope {
            Scope::Os => {
                if candidates.is_empty() {
                    tracing::warn!(
                        "no standard-library modules were found; the OS check passes without loading anything"
                    );
                }
                if let Some(failed) = candidates.iter().find(|name| !try_load(self.loader, name)) {
                    tracing::info!("standard library check failed at '{}'", failed);
                    return Ok(CheckOutcome::Broken);
                }
                Ok(CheckOutcome::Intact)
            }
            _ => {
                let passed = candidates
                    .iter()
                    .filter(|name| try_load(self.loader, name))
                    .count();
                tracing::info!("{} of {} installed names loaded", passed, candidates.len());
                Ok(CheckOutcome::from_count(passed))
            }
        }
    }

    /// Every candidate of a scope that fails to load.
    ///
    /// Unlike [`check`](Self::check) this never short-circuits.
    pub fn list_failed(&self, scope: Scope) -> Result<Vec<String>> {
        Ok(self
            .candidates(scope)?
            .into_iter()
            .filter(|name| !try_load(self.loader, name))
            .collect())
    }
}
