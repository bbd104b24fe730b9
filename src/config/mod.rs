//! Configuration loading for pycheck.
//!
//! - Schema definition and merge rules in [`schema`]
//! - File discovery, loading and environment overrides in [`loader`]
//!
//! # Example
//!
//! ```
//! use pycheck::config::load_config;
//! use std::collections::HashMap;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".pycheck.yml"), "skip: [sqlite3]").unwrap();
//!
//! let config = load_config(temp.path(), None, &HashMap::new()).unwrap();
//! assert!(config.skip.contains(&"sqlite3".to_string()));
//! ```
//!
//! # Configuration File Locations
//!
//! pycheck merges configuration in this order:
//! 1. User global config (`~/.pycheck/config.yml`)
//! 2. Project config (`.pycheck.yml` in the working directory), or the file
//!    given with `--config`
//! 3. `PYCHECK_PYTHON`, `PYCHECK_STDLIB_DIR` and `PYCHECK_SCRATCH_DIR`

pub mod loader;
pub mod schema;

pub use loader::{
    apply_env_overrides, load_config, load_config_file, parse_config, ConfigPaths,
    PROJECT_CONFIG,
};
pub use schema::PycheckConfig;
