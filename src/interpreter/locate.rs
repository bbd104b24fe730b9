//! Locating a Python executable.
//!
//! An explicit path (from `--python`, `PYCHECK_PYTHON` or config) always wins.
//! Otherwise `PATH` is searched for the conventional executable names in
//! order, the same way a shell would resolve `python3`.

use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Executable names tried, in order, when no explicit interpreter is given.
pub const CANDIDATE_NAMES: &[&str] = &["python3", "python"];

/// Directories named by `PATH`, in search order. Empty when `PATH` is unset.
pub fn search_dirs() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Whether `path` is a regular file this process could run as an interpreter.
fn is_runnable(path: &Path) -> bool {
    path.metadata()
        .map(|meta| meta.is_file() && has_exec_bit(&meta))
        .unwrap_or(false)
}

#[cfg(unix)]
fn has_exec_bit(meta: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

/// No execute bits here; the `.exe` name already marks a file runnable.
#[cfg(not(unix))]
fn has_exec_bit(_meta: &Metadata) -> bool {
    true
}

/// The file names `name` may be installed under on this platform.
fn file_names(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];
    if cfg!(windows) {
        names.push(format!("{}.exe", name));
    }
    names
}

/// The first runnable `name` in `dirs`, searched in order.
pub fn interpreter_in(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let names = file_names(name);
    dirs.iter()
        .flat_map(|dir| names.iter().map(move |file| dir.join(file)))
        .find(|path| is_runnable(path))
}

/// Find the first conventional Python executable in `dirs`.
///
/// Every candidate name is tried across all of `dirs` before moving to the
/// next name, so `python3` anywhere beats `python` earlier on `PATH`.
pub fn find_interpreter(dirs: &[PathBuf]) -> Option<PathBuf> {
    CANDIDATE_NAMES
        .iter()
        .find_map(|name| interpreter_in(name, dirs))
}
