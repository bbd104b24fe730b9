//! Configuration schema for pycheck.
//!
//! Every field is optional; an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `.pycheck.yml` and `~/.pycheck/config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PycheckConfig {
    /// Interpreter to inspect instead of searching `PATH`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<PathBuf>,

    /// Standard-library directory used when the interpreter cannot list its
    /// own modules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdlib_dir: Option<PathBuf>,

    /// Extra directories searched for installed distributions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub site_paths: Vec<PathBuf>,

    /// Extra standard-library names excluded from `OS` checks
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skip: Vec<String>,

    /// Where the filesystem probe creates its temporary directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
}

impl PycheckConfig {
    /// Layer `overlay` on top of `self`.
    ///
    /// Scalars set in the overlay replace the base; lists are concatenated,
    /// base first, without duplicates.
    pub fn merge(mut self, overlay: PycheckConfig) -> Self {
        if overlay.python.is_some() {
            self.python = overlay.python;
        }
        if overlay.stdlib_dir.is_some() {
            self.stdlib_dir = overlay.stdlib_dir;
        }
        if overlay.scratch_dir.is_some() {
            self.scratch_dir = overlay.scratch_dir;
        }
        extend_unique(&mut self.site_paths, overlay.site_paths);
        extend_unique(&mut self.skip, overlay.skip);
        self
    }
}

fn extend_unique<T: PartialEq>(base: &mut Vec<T>, extra: Vec<T>) {
    for item in extra {
        if !base.contains(&item) {
            base.push(item);
        }
    }
}
