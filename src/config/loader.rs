//! Configuration file discovery and loading.
//!
//! This module finds the configuration files that apply to a run, loads
//! them in priority order and applies environment overrides.

use crate::config::schema::PycheckConfig;
use crate::error::{PycheckError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG: &str = ".pycheck.yml";

/// Environment variables that override config file values.
pub const ENV_PYTHON: &str = "PYCHECK_PYTHON";
pub const ENV_STDLIB_DIR: &str = "PYCHECK_STDLIB_DIR";
pub const ENV_SCRATCH_DIR: &str = "PYCHECK_SCRATCH_DIR";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.pycheck/config.yml`)
/// 2. Project config (`.pycheck.yml`), or the file given with `--config`
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// User's global config: ~/.pycheck/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config, or an explicit override
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given working directory.
    ///
    /// An explicit path replaces the project config and is kept even when it
    /// does not exist, so loading it reports the problem.
    pub fn discover(working_dir: &Path, explicit: Option<&Path>) -> Self {
        Self {
            user_global: Self::find_user_global(),
            project: match explicit {
                Some(path) => Some(path.to_path_buf()),
                None => Self::find_project_config(working_dir),
            },
        }
    }

    /// Find user's global config at ~/.pycheck/config.yml
    fn find_user_global() -> Option<PathBuf> {
        let path = dirs::home_dir()?.join(".pycheck").join("config.yml");
        path.exists().then_some(path)
    }

    /// Find project config at .pycheck.yml
    fn find_project_config(working_dir: &Path) -> Option<PathBuf> {
        let path = working_dir.join(PROJECT_CONFIG);
        path.exists().then_some(path)
    }

    /// Returns all config paths in merge order.
    pub fn all(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.project.iter()).collect()
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `Io` if the file can't be read.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PycheckConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into PycheckConfig.
///
/// An empty document is the default config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PycheckConfig> {
    if content.trim().is_empty() {
        return Ok(PycheckConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| PycheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply `PYCHECK_*` overrides from an environment snapshot.
///
/// Empty values are ignored.
pub fn apply_env_overrides(config: &mut PycheckConfig, env: &HashMap<String, String>) {
    let lookup = |key: &str| {
        env.get(key)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    };

    if let Some(python) = lookup(ENV_PYTHON) {
        config.python = Some(python);
    }
    if let Some(dir) = lookup(ENV_STDLIB_DIR) {
        config.stdlib_dir = Some(dir);
    }
    if let Some(dir) = lookup(ENV_SCRATCH_DIR) {
        config.scratch_dir = Some(dir);
    }
}

/// Load the effective config for a run.
///
/// Merges every discovered file, then applies environment overrides.
pub fn load_config(
    working_dir: &Path,
    explicit: Option<&Path>,
    env: &HashMap<String, String>,
) -> Result<PycheckConfig> {
    let paths = ConfigPaths::discover(working_dir, explicit);

    let mut config = PycheckConfig::default();
    for path in paths.all() {
        tracing::debug!("loading config from {}", path.display());
        config = config.merge(load_config_file(path)?);
    }

    apply_env_overrides(&mut config, env);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn discover_finds_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), "skip: [sqlite3]").unwrap();

        let paths = ConfigPaths::discover(temp.path(), None);
        assert_eq!(paths.project, Some(temp.path().join(PROJECT_CONFIG)));
    }

    #[test]
    fn discover_returns_none_for_missing_project_config() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path(), None);
        assert!(paths.project.is_none());
    }

    #[test]
    fn explicit_path_replaces_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), "").unwrap();
        let custom = temp.path().join("custom.yml");

        let paths = ConfigPaths::discover(temp.path(), Some(&custom));
        assert_eq!(paths.project, Some(custom));
    }

    #[test]
    fn load_config_file_handles_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "").unwrap();

        assert_eq!(load_config_file(&path).unwrap(), PycheckConfig::default());
    }

    #[test]
    fn parse_config_returns_parse_error_for_invalid_yaml() {
        let result = parse_config("skip: [", Path::new("bad.yml"));
        assert!(matches!(
            result,
            Err(PycheckError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yml");
        let result = load_config(temp.path(), Some(&missing), &no_env());
        assert!(matches!(result, Err(PycheckError::Io(_))));
    }

    #[test]
    fn load_config_reads_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG),
            "stdlib_dir: /opt/lib/python3.12\nskip:\n  - sqlite3\n",
        )
        .unwrap();

        let config = load_config(temp.path(), None, &no_env()).unwrap();
        assert_eq!(config.stdlib_dir, Some(PathBuf::from("/opt/lib/python3.12")));
        assert!(config.skip.contains(&"sqlite3".to_string()));
    }

    #[test]
    fn env_overrides_beat_files() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG),
            "python: /usr/bin/python3\nscratch_dir: /tmp\n",
        )
        .unwrap();

        let mut env = HashMap::new();
        env.insert(ENV_PYTHON.to_string(), "/opt/bin/python3".to_string());
        env.insert(ENV_SCRATCH_DIR.to_string(), String::new());

        let config = load_config(temp.path(), None, &env).unwrap();
        assert_eq!(config.python, Some(PathBuf::from("/opt/bin/python3")));
        assert_eq!(config.scratch_dir, Some(PathBuf::from("/tmp")));
    }
}
