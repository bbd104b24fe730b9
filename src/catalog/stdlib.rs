//! Standard-library enumeration.
//!
//! The preferred source is the interpreter's own list
//! (`sys.stdlib_module_names`, Python 3.10+). Older interpreters don't have
//! it, so the fallback scans the standard-library directory for anything
//! that looks importable.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PycheckError, Result};
use crate::interpreter::Interpreter;

use super::StandardLibraryCatalog;

/// Extension-module suffixes recognised by the directory scan.
const EXTENSION_SUFFIXES: &[&str] = &[".so", ".pyd"];

/// Standard library of a real interpreter.
pub struct InterpreterStdlib<'a> {
    interpreter: &'a Interpreter,
    stdlib_dir: Option<PathBuf>,
}

impl<'a> InterpreterStdlib<'a> {
    /// Enumerate through the given interpreter.
    pub fn new(interpreter: &'a Interpreter) -> Self {
        Self {
            interpreter,
            stdlib_dir: None,
        }
    }

    /// Use this directory for the fallback scan instead of asking the interpreter.
    pub fn with_stdlib_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.stdlib_dir = dir;
        self
    }

    fn fallback_dir(&self) -> Result<PathBuf> {
        match &self.stdlib_dir {
            Some(dir) => Ok(dir.clone()),
            None => self.interpreter.stdlib_dir(),
        }
    }
}

impl StandardLibraryCatalog for InterpreterStdlib<'_> {
    fn module_names(&self) -> Result<Vec<String>> {
        match self.interpreter.stdlib_module_names() {
            Ok(names) => Ok(names),
            Err(e) => {
                tracing::debug!("stdlib enumeration unavailable ({}), scanning directory", e);
                scan_stdlib_dir(&self.fallback_dir()?)
            }
        }
    }
}

/// List module-like entries of a standard-library directory.
///
/// Recognises `name.py`, `name.pyc`, package directories with an
/// `__init__.py`, and extension modules (`name.cpython-312-x86_64-linux-gnu.so`,
/// `name.pyd`). Entries whose name is not a valid identifier are ignored.
/// Unreadable individual entries are skipped; an unreadable directory is an
/// error.
pub fn scan_stdlib_dir(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| PycheckError::Discovery {
        message: format!("cannot scan {}: {}", dir.display(), e),
    })?;

    let mut names = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let name = if path.is_dir() {
            path.join("__init__.py").is_file().then_some(file_name)
        } else {
            module_stem(file_name)
        };

        if let Some(name) = name.filter(|n| is_identifier(n)) {
            names.push(name.to_string());
        }
    }

    names.sort();
    names.dedup();
    Ok(names)
}

/// Module name of a file, if the file is an importable module.
fn module_stem(file_name: &str) -> Option<&str> {
    if let Some(stem) = file_name.strip_suffix(".py") {
        return Some(stem);
    }
    if let Some(stem) = file_name.strip_suffix(".pyc") {
        return Some(stem);
    }
    if EXTENSION_SUFFIXES.iter().any(|s| file_name.ends_with(s)) {
        return file_name.split('.').next();
    }
    None
}

/// Whether `name` is a valid (ASCII) Python identifier.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
