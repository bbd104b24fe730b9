//! The Python interpreter under inspection.
//!
//! pycheck never embeds Python. Everything the interpreter has to answer
//! (its standard-library module names, its search path, whether a module
//! imports, whether `ssl` works) is asked by running a short script in a
//! child process.
//!
//! # Modules
//!
//! - [`exec`] - Child process execution and output capture
//! - [`locate`] - Finding a Python executable on `PATH`

pub mod exec;
pub mod locate;

pub use exec::{run_script, ScriptOutput};
pub use locate::{find_interpreter, search_dirs, CANDIDATE_NAMES};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PycheckError, Result};

/// Prints `sys.stdlib_module_names`; exits 3 when the interpreter predates it.
const STDLIB_NAMES_SCRIPT: &str = r#"import sys
names = getattr(sys, "stdlib_module_names", None)
if names is None:
    sys.exit(3)
print("\n".join(sorted(names)))
"#;

const STDLIB_DIR_SCRIPT: &str = r#"import os
print(os.path.dirname(os.__file__))
"#;

const SEARCH_PATH_SCRIPT: &str = r#"import sys
print("\n".join(p for p in sys.path if p))
"#;

const DESCRIBE_SCRIPT: &str = r#"import json, platform
print(json.dumps({
    "version": platform.python_version(),
    "implementation": platform.python_implementation(),
    "system": platform.system(),
    "release": platform.release(),
    "machine": platform.machine(),
}))
"#;

/// Platform facts reported by the interpreter itself.
///
/// Deliberately excludes the executable path and anything else that would
/// identify the machine's user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonInfo {
    pub version: String,
    pub implementation: String,
    pub system: String,
    pub release: String,
    pub machine: String,
}

/// A Python executable that scripts can be run against.
#[derive(Debug, Clone)]
pub struct Interpreter {
    program: PathBuf,
}

impl Interpreter {
    /// Wrap a known interpreter path without checking it.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate the interpreter to inspect.
    ///
    /// An explicit path must exist. Without one, `PATH` is searched for
    /// [`CANDIDATE_NAMES`].
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok(Self::new(path));
            }
            return Err(PycheckError::InterpreterNotFound {
                searched: path.display().to_string(),
            });
        }

        find_interpreter(&search_dirs())
            .map(Self::new)
            .ok_or_else(|| PycheckError::InterpreterNotFound {
                searched: format!("{} on PATH", CANDIDATE_NAMES.join(", ")),
            })
    }

    /// Path of the interpreter executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run a script with extra argv entries.
    pub fn run<S: AsRef<std::ffi::OsStr>>(&self, script: &str, args: &[S]) -> Result<ScriptOutput> {
        run_script(&self.program, script, args).map_err(|e| PycheckError::InterpreterFailed {
            message: format!("could not start {}: {}", self.program.display(), e),
        })
    }

    /// Run a script that must succeed and return its stdout lines.
    fn query_lines(&self, script: &str) -> Result<Vec<String>> {
        let output = self.run::<&str>(script, &[])?;
        if !output.success {
            return Err(PycheckError::InterpreterFailed {
                message: format!(
                    "query exited with {:?}: {}",
                    output.exit_code,
                    output.stderr.trim()
                ),
            });
        }
        Ok(output.lines())
    }

    /// Standard-library module names as enumerated by the interpreter.
    pub fn stdlib_module_names(&self) -> Result<Vec<String>> {
        self.query_lines(STDLIB_NAMES_SCRIPT)
    }

    /// Directory holding the pure-Python standard library.
    pub fn stdlib_dir(&self) -> Result<PathBuf> {
        self.query_lines(STDLIB_DIR_SCRIPT)?
            .into_iter()
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| PycheckError::InterpreterFailed {
                message: "interpreter did not report a stdlib directory".to_string(),
            })
    }

    /// Import search path (`sys.path`) of the interpreter.
    pub fn search_paths(&self) -> Result<Vec<PathBuf>> {
        Ok(self
            .query_lines(SEARCH_PATH_SCRIPT)?
            .into_iter()
            .map(PathBuf::from)
            .collect())
    }

    /// Version and platform facts for reports.
    pub fn describe(&self) -> Result<PythonInfo> {
        let lines = self.query_lines(DESCRIBE_SCRIPT)?;
        let json = lines.first().map(String::as_str).unwrap_or_default();
        serde_json::from_str(json).map_err(|e| PycheckError::InterpreterFailed {
            message: format!("unreadable platform description: {}", e),
        })
    }
}
