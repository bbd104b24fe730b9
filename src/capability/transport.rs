//! Secure transport probe.
//!
//! Checks that the interpreter can build a default client-side TLS context,
//! the step every HTTPS client takes first.

use thiserror::Error;

use super::CapabilityResult;
use crate::interpreter::Interpreter;
use crate::loader::contain;

/// Capability name reported by this probe.
pub const CAPABILITY: &str = "ssl";

const SUCCESS: &str = "SSL module and default context available.";

/// Exit 3: the module or its constructor is missing. Exit 4: construction
/// raised. The exception class (and message) is printed on stdout.
const SSL_SCRIPT: &str = r#"import sys
try:
    import ssl
    ssl.create_default_context
except (ImportError, AttributeError) as exc:
    print(exc.__class__.__name__)
    sys.exit(3)
try:
    ssl.create_default_context()
except Exception as exc:
    print(exc.__class__.__name__)
    print(exc)
    sys.exit(4)
"#;

/// Why a default context could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The TLS backend cannot be loaded or has no context constructor.
    #[error("{kind}")]
    Unavailable { kind: String },

    /// The backend loaded but constructing a context failed.
    #[error("{kind}: {message}")]
    Degraded { kind: String, message: String },
}

/// A TLS backend that can be asked for a default context.
pub trait SecureTransport {
    fn create_default_context(&self) -> Result<(), TransportError>;
}

/// The `ssl` module of a real interpreter.
pub struct InterpreterTransport<'a> {
    interpreter: &'a Interpreter,
}

impl<'a> InterpreterTransport<'a> {
    pub fn new(interpreter: &'a Interpreter) -> Self {
        Self { interpreter }
    }
}

impl SecureTransport for InterpreterTransport<'_> {
    fn create_default_context(&self) -> Result<(), TransportError> {
        let output = self
            .interpreter
            .run::<&str>(SSL_SCRIPT, &[])
            .map_err(|e| TransportError::Unavailable {
                kind: e.to_string(),
            })?;

        let mut lines = output.lines().into_iter();
        let kind = lines.next().unwrap_or_else(|| "UnknownError".to_string());

        match output.exit_code {
            Some(0) => Ok(()),
            Some(3) => Err(TransportError::Unavailable { kind }),
            Some(4) => Err(TransportError::Degraded {
                kind,
                message: lines.collect::<Vec<_>>().join(" "),
            }),
            code => Err(TransportError::Degraded {
                kind: "InterpreterError".to_string(),
                message: format!("interpreter exited with {:?}: {}", code, output.stderr.trim()),
            }),
        }
    }
}

/// Probe a TLS backend.
///
/// `Unavailable` is a `fail`. `Degraded`, and a backend that panics, are a
/// `warn`.
pub fn probe_secure_transport(transport: &dyn SecureTransport) -> CapabilityResult {
    match contain("secure transport", || transport.create_default_context()) {
        Some(Ok(())) => CapabilityResult::ok(CAPABILITY, SUCCESS),
        Some(Err(e @ TransportError::Unavailable { .. })) => {
            CapabilityResult::fail(CAPABILITY, format!("SSL unavailable: {}", e))
        }
        Some(Err(e @ TransportError::Degraded { .. })) => {
            CapabilityResult::warn(CAPABILITY, format!("SSL issue: {}", e))
        }
        None => CapabilityResult::warn(CAPABILITY, "SSL issue: Panic: TLS backend panicked"),
    }
}
