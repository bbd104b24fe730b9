//! Running short scripts in a child interpreter.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of running a script in a child interpreter.
#[derive(Debug, Clone)]
pub struct ScriptOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the script succeeded (exit code 0).
    pub success: bool,
}

impl ScriptOutput {
    /// Non-empty, trimmed stdout lines.
    pub fn lines(&self) -> Vec<String> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Run `program -c script args...` and capture its output.
///
/// Stdin is closed and bytecode writing is disabled so the child leaves no
/// `__pycache__` entries behind in the installation being inspected. Script
/// arguments are passed as separate argv entries, never interpolated into
/// the script text.
pub fn run_script<I, S>(program: &Path, script: &str, args: I) -> std::io::Result<ScriptOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let start = Instant::now();

    let output = Command::new(program)
        .arg("-c")
        .arg(script)
        .args(args)
        .env("PYTHONDONTWRITEBYTECODE", "1")
        .env("PYTHONIOENCODING", "utf-8")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;

    Ok(ScriptOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
        success: output.status.success(),
    })
}
