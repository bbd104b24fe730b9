//! Integration tests for the pycheck binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pycheck(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("pycheck"));
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("PYCHECK_PYTHON")
        .env_remove("PYCHECK_STDLIB_DIR")
        .env_remove("PYCHECK_SCRATCH_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    pycheck(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("candidates"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    pycheck(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_missing_interpreter_exits_with_setup_error() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    pycheck(&home)
        .args(["--python", "/nonexistent/python3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
    Ok(())
}

#[test]
fn cli_malformed_config_exits_with_setup_error() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    std::fs::write(home.path().join(".pycheck.yml"), "skip: [")?;
    pycheck(&home)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_generates_completions() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    pycheck(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pycheck"));
    Ok(())
}

#[cfg(unix)]
mod stub_interpreter {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    /// Interpreter whose queries succeed with empty output.
    const SILENT: &str = "#!/bin/sh\nexit 0\n";

    /// Interpreter with a two-module standard library where every import
    /// raises.
    const BROKEN_IMPORTS: &str = r#"#!/bin/sh
case "$2" in
  *stdlib_module_names*) printf 'json\nos\n_thread\n' ;;
  *importlib*) exit 4 ;;
esac
exit 0
"#;

    fn write_stub(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("python3");
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn default_run_reports_os_ok() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let python = write_stub(&home, SILENT);

        pycheck(&home)
            .arg("--python")
            .arg(&python)
            .assert()
            .success()
            .stdout(predicate::str::contains("OS: OK"))
            .stdout(predicate::str::contains("Capability (filesystem_access): OK"))
            .stdout(predicate::str::contains("Capability (ssl): OK"));
        Ok(())
    }

    #[test]
    fn json_report_is_valid_and_sanitized() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let python = write_stub(&home, SILENT);

        let output = pycheck(&home)
            .arg("--json")
            .arg("--python")
            .arg(&python)
            .output()?;
        assert_eq!(output.status.code(), Some(0));
        let home_path = home.path().to_string_lossy().into_owned();
        assert!(!String::from_utf8_lossy(&output.stdout).contains(&home_path));

        let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(report["pycheck_version"], env!("CARGO_PKG_VERSION"));
        assert!(report["python"].is_null());
        assert_eq!(report["exit_code"], 0);

        let names: Vec<&str> = report["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["OS", "filesystem_access", "ssl"]);
        Ok(())
    }

    #[test]
    fn all_with_no_packages_fails() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let python = write_stub(&home, SILENT);

        pycheck(&home)
            .arg("--all")
            .arg("--python")
            .arg(&python)
            .assert()
            .code(1)
            .stdout(predicate::str::contains("ALL: FAILED"));
        Ok(())
    }

    #[test]
    fn broken_stdlib_fails_os_check() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let python = write_stub(&home, BROKEN_IMPORTS);

        pycheck(&home)
            .arg("--python")
            .arg(&python)
            .assert()
            .code(1)
            .stdout(predicate::str::contains("OS: FAILED"));
        Ok(())
    }

    #[test]
    fn failed_lists_every_broken_module() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let python = write_stub(&home, BROKEN_IMPORTS);

        pycheck(&home)
            .arg("failed")
            .arg("--python")
            .arg(&python)
            .assert()
            .code(1)
            .stdout("json\nos\n");
        Ok(())
    }

    #[test]
    fn candidates_respect_config_skip() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let python = write_stub(&home, BROKEN_IMPORTS);
        fs::write(home.path().join(".pycheck.yml"), "skip: [os]\n")?;

        pycheck(&home)
            .arg("candidates")
            .arg("--python")
            .arg(&python)
            .assert()
            .success()
            .stdout("json\n");
        Ok(())
    }

    #[test]
    fn python_from_environment_is_used() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let python = write_stub(&home, SILENT);

        pycheck(&home)
            .env("PYCHECK_PYTHON", &python)
            .assert()
            .success()
            .stdout(predicate::str::contains("OS: OK"));
        Ok(())
    }
}
