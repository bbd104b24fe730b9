//! Safe loading of a single module.
//!
//! [`try_load`] is the boundary between pycheck and an environment that may
//! be arbitrarily broken: a missing module, a module that raises while it
//! initializes, a loader implementation that panics. Everything on the far
//! side of the boundary is turned into `false`. The catch-all in
//! [`contain`] is intentional; hostile and corrupted environments are what
//! this tool exists to diagnose.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use thiserror::Error;

use crate::interpreter::{run_script, Interpreter};

/// Imports `sys.argv[1]` and reports the outcome through the exit code.
const IMPORT_SCRIPT: &str = r#"import importlib, sys
try:
    importlib.import_module(sys.argv[1])
except ModuleNotFoundError:
    sys.exit(3)
except ImportError:
    sys.exit(4)
except AttributeError:
    sys.exit(5)
except BaseException:
    sys.exit(6)
"#;

/// Why a load attempt failed, beyond "no such module".
#[derive(Debug, Error)]
pub enum LoadError {
    /// The module exists but raised `ImportError` while loading.
    #[error("import of '{name}' failed")]
    ImportFailed { name: String },

    /// The module was left partially initialized (`AttributeError`).
    #[error("'{name}' is partially initialized")]
    PartiallyInitialized { name: String },

    /// Loading raised something nobody anticipated.
    #[error("loading '{name}' raised an unexpected error (exit code {code:?})")]
    Unexpected { name: String, code: Option<i32> },

    /// The runtime could not be started to attempt the load.
    #[error("could not start the runtime to load '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can attempt to load a module by name.
pub trait ModuleLoader {
    /// Attempt to load `name`.
    ///
    /// `Ok(true)` means it loaded, `Ok(false)` means the runtime reported no
    /// such module. Every other failure is an `Err`.
    fn load(&self, name: &str) -> Result<bool, LoadError>;
}

/// Loads modules in a fresh child interpreter per name.
///
/// One process per candidate keeps each import's side effects away from
/// every other candidate.
pub struct InterpreterLoader<'a> {
    interpreter: &'a Interpreter,
}

impl<'a> InterpreterLoader<'a> {
    /// Load through the given interpreter.
    pub fn new(interpreter: &'a Interpreter) -> Self {
        Self { interpreter }
    }
}

impl ModuleLoader for InterpreterLoader<'_> {
    fn load(&self, name: &str) -> Result<bool, LoadError> {
        let output = run_script(self.interpreter.program(), IMPORT_SCRIPT, [name]).map_err(
            |source| LoadError::Spawn {
                name: name.to_string(),
                source,
            },
        )?;

        if !output.stderr.is_empty() {
            tracing::trace!(module = name, stderr = %output.stderr.trim(), "import output");
        }

        match output.exit_code {
            Some(0) => Ok(true),
            Some(3) => Ok(false),
            Some(4) => Err(LoadError::ImportFailed {
                name: name.to_string(),
            }),
            Some(5) => Err(LoadError::PartiallyInitialized {
                name: name.to_string(),
            }),
            code => Err(LoadError::Unexpected {
                name: name.to_string(),
                code,
            }),
        }
    }
}

/// Names that must never reach a loader.
///
/// Relative (`.pkg`) and flag-like (`-m`) names would be misread by the
/// underlying import machinery or command line.
pub fn is_loadable_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.starts_with('-')
}

thread_local! {
    static CONTAINING: Cell<usize> = const { Cell::new(0) };
}

static QUIET_HOOK: Once = Once::new();

/// Marks the current thread as inside [`contain`] until dropped, including
/// when dropped by unwinding.
struct ContainGuard;

impl ContainGuard {
    fn enter() -> Self {
        CONTAINING.with(|depth| depth.set(depth.get() + 1));
        ContainGuard
    }
}

impl Drop for ContainGuard {
    fn drop(&mut self) {
        CONTAINING.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Whether a panic on this thread right now would be caught by [`contain`].
pub fn panics_are_contained() -> bool {
    CONTAINING.with(|depth| depth.get() > 0)
}

/// Wrap the process panic hook so contained panics go to the debug log
/// instead of stderr. Panics anywhere else still reach the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if panics_are_contained() {
                tracing::debug!("panic inside contained call: {}", info);
            } else {
                previous(info);
            }
        }));
    });
}

/// Run `f`, converting any panic into `None`.
///
/// This is the single place pycheck catches everything. Callers use it
/// around code that touches the inspected environment, where a failure of
/// any kind is a finding to report, not a bug to propagate.
///
/// The first call installs a panic hook that keeps contained panics off
/// stderr; they are logged at debug level instead.
pub fn contain<T>(what: &str, f: impl FnOnce() -> T) -> Option<T> {
    install_quiet_hook();
    let outcome = {
        let _guard = ContainGuard::enter();
        panic::catch_unwind(AssertUnwindSafe(f))
    };
    match outcome {
        Ok(value) => Some(value),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            tracing::debug!("contained panic in {}: {}", what, reason);
            None
        }
    }
}

/// Attempt to load one candidate, reporting success as a boolean.
///
/// Never panics and never returns an error.
pub fn try_load(loader: &dyn ModuleLoader, name: &str) -> bool {
    if !is_loadable_name(name) {
        tracing::debug!("rejected malformed module name {:?}", name);
        return false;
    }

    match contain(name, || loader.load(name)) {
        Some(Ok(true)) => true,
        Some(Ok(false)) => {
            tracing::debug!(module = name, "module not found");
            false
        }
        Some(Err(e)) => {
            tracing::debug!(module = name, error = %e, "module failed to load");
            false
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingLoader {
        calls: RefCell<Vec<String>>,
    }

    impl ModuleLoader for RecordingLoader {
        fn load(&self, name: &str) -> Result<bool, LoadError> {
            self.calls.borrow_mut().push(name.to_string());
            Ok(true)
        }
    }

    struct PanickingLoader;

    impl ModuleLoader for PanickingLoader {
        fn load(&self, name: &str) -> Result<bool, LoadError> {
            panic!("registry entry for {} is a recursive proxy", name);
        }
    }

    struct FailingLoader;

    impl ModuleLoader for FailingLoader {
        fn load(&self, name: &str) -> Result<bool, LoadError> {
            Err(LoadError::PartiallyInitialized {
                name: name.to_string(),
            })
        }
    }

    struct MissingLoader;

    impl ModuleLoader for MissingLoader {
        fn load(&self, _name: &str) -> Result<bool, LoadError> {
            Ok(false)
        }
    }

    #[test]
    fn malformed_names_never_reach_the_loader() {
        let loader = RecordingLoader {
            calls: RefCell::new(Vec::new()),
        };

        assert!(!try_load(&loader, ""));
        assert!(!try_load(&loader, ".relative"));
        assert!(!try_load(&loader, "-m"));
        assert!(loader.calls.borrow().is_empty());

        assert!(try_load(&loader, "json"));
        assert_eq!(*loader.calls.borrow(), vec!["json"]);
    }

    #[test]
    fn panicking_loader_is_contained() {
        assert!(!try_load(&PanickingLoader, "hostile"));
    }

    #[test]
    fn load_errors_become_false() {
        assert!(!try_load(&FailingLoader, "half_built"));
    }

    #[test]
    fn not_found_becomes_false() {
        assert!(!try_load(&MissingLoader, "nonexistent_module"));
    }

    #[test]
    fn containment_is_tracked_per_call() {
        assert!(!panics_are_contained());
        assert_eq!(contain("outer", panics_are_contained), Some(true));
        assert_eq!(
            contain("outer", || contain("inner", panics_are_contained)),
            Some(Some(true))
        );
        assert!(!panics_are_contained());
    }

    #[test]
    fn containment_ends_after_a_panic() {
        assert_eq!(contain("noisy", || -> u8 { panic!("import hook exploded") }), None);
        assert!(!panics_are_contained());
    }

    #[test]
    fn contain_passes_values_through() {
        assert_eq!(contain("value", || 7), Some(7));
    }

    #[test]
    fn contain_swallows_string_panics() {
        let owned = contain("owned", || -> u8 { panic!("{}", String::from("boom")) });
        assert_eq!(owned, None);
    }

    #[test]
    fn loader_with_missing_interpreter_reports_spawn_error() {
        let interpreter = Interpreter::new("/nonexistent/python3");
        let loader = InterpreterLoader::new(&interpreter);

        let err = loader.load("os").unwrap_err();
        assert!(matches!(err, LoadError::Spawn { .. }));
        assert!(!try_load(&loader, "os"));
    }

    /// Child interpreters that ignore the import script and just exit.
    #[cfg(unix)]
    mod exit_codes {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;
        use tempfile::TempDir;

        fn stub(dir: &TempDir, name: &str, body: &str) -> Interpreter {
            let path: PathBuf = dir.path().join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            Interpreter::new(path)
        }

        fn load_with(body: &str) -> Result<bool, LoadError> {
            let dir = TempDir::new().unwrap();
            let interpreter = stub(&dir, "python3", body);
            InterpreterLoader::new(&interpreter).load("candidate")
        }

        #[test]
        fn clean_exit_is_loaded() {
            assert!(load_with("exit 0").unwrap());
        }

        #[test]
        fn module_not_found_is_not_an_error() {
            assert!(!load_with("exit 3").unwrap());
        }

        #[test]
        fn import_error_exit() {
            let err = load_with("exit 4").unwrap_err();
            assert!(matches!(err, LoadError::ImportFailed { ref name } if name == "candidate"));
        }

        #[test]
        fn attribute_error_exit_is_partially_initialized() {
            let err = load_with("exit 5").unwrap_err();
            assert!(matches!(err, LoadError::PartiallyInitialized { .. }));
        }

        #[test]
        fn unknown_exit_code_is_unexpected() {
            let err = load_with("exit 7").unwrap_err();
            assert!(matches!(err, LoadError::Unexpected { code: Some(7), .. }));
        }

        #[test]
        fn killed_child_is_unexpected_without_code() {
            let err = load_with("kill -9 $$").unwrap_err();
            assert!(matches!(err, LoadError::Unexpected { code: None, .. }));
        }
    }
}
