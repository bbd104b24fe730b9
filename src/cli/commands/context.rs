//! Resolved configuration and interpreter shared by the commands.

use std::collections::HashMap;
use std::path::Path;

use crate::catalog::{InterpreterStdlib, SitePackagesCatalog};
use crate::check::Checker;
use crate::cli::args::Cli;
use crate::config::{load_config, PycheckConfig};
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::loader::InterpreterLoader;

/// Everything a command needs to talk to the inspected interpreter.
#[derive(Debug)]
pub struct RunContext {
    pub config: PycheckConfig,
    pub interpreter: Interpreter,
}

impl RunContext {
    /// Load config and locate the interpreter.
    ///
    /// `--python` beats the environment, which beats config files.
    pub fn load(cli: &Cli, working_dir: &Path) -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        let mut config = load_config(working_dir, cli.config.as_deref(), &env)?;
        if let Some(python) = &cli.python {
            config.python = Some(python.clone());
        }

        let interpreter = Interpreter::locate(config.python.as_deref())?;
        tracing::debug!("inspecting {}", interpreter.program().display());

        Ok(Self {
            config,
            interpreter,
        })
    }

    /// Standard-library catalog for the interpreter.
    pub fn stdlib(&self) -> InterpreterStdlib<'_> {
        InterpreterStdlib::new(&self.interpreter).with_stdlib_dir(self.config.stdlib_dir.clone())
    }

    /// Installed-distribution catalog for the interpreter.
    ///
    /// An interpreter that cannot report its import path gets an empty
    /// catalog, so `ALL` finds nothing instead of aborting.
    pub fn installed(&self) -> SitePackagesCatalog {
        SitePackagesCatalog::for_interpreter(&self.interpreter, &self.config.site_paths)
            .unwrap_or_else(|e| {
                tracing::warn!("installed distributions unavailable: {}", e);
                SitePackagesCatalog::new(Vec::new())
            })
    }

    pub fn loader(&self) -> InterpreterLoader<'_> {
        InterpreterLoader::new(&self.interpreter)
    }
}

/// Borrowed catalogs and loader, kept alive for a [`Checker`].
pub struct CheckParts<'a> {
    pub stdlib: InterpreterStdlib<'a>,
    pub installed: SitePackagesCatalog,
    pub loader: InterpreterLoader<'a>,
}

impl<'a> CheckParts<'a> {
    pub fn new(context: &'a RunContext) -> Self {
        Self {
            stdlib: context.stdlib(),
            installed: context.installed(),
            loader: context.loader(),
        }
    }

    /// A checker over these parts honoring the configured skip list.
    pub fn checker(&self, skip: &[String]) -> Checker<'_> {
        Checker::new(&self.stdlib, &self.installed, &self.loader).with_extra_skip(skip.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn python_flag_beats_config_file() {
        let temp = TempDir::new().unwrap();
        let interpreter = temp.path().join("python3");
        fs::write(&interpreter, "").unwrap();
        fs::write(
            temp.path().join(".pycheck.yml"),
            "python: /nonexistent/python3\nskip: [sqlite3]\n",
        )
        .unwrap();

        let cli = Cli::parse_from(["pycheck", "--python", interpreter.to_str().unwrap()]);
        let context = RunContext::load(&cli, temp.path()).unwrap();

        assert_eq!(context.interpreter.program(), interpreter.as_path());
        assert!(context.config.skip.contains(&"sqlite3".to_string()));
    }

    #[test]
    fn broken_interpreter_gives_empty_installed_catalog() {
        let context = RunContext {
            config: PycheckConfig::default(),
            interpreter: Interpreter::new("/nonexistent/python3"),
        };
        assert!(context.installed().search_paths().is_empty());
    }
}
