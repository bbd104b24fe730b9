//! Capability probes.
//!
//! Each probe exercises one thing a healthy installation is expected to be
//! able to do and reports a [`CapabilityResult`]. Probes never fail: a
//! problem is reported through the result's status.
//!
//! # Modules
//!
//! - [`filesystem`] - Temporary-directory write/read round trip
//! - [`transport`] - Default TLS context construction

pub mod filesystem;
pub mod transport;

pub use filesystem::{
    probe_filesystem_access, probe_filesystem_access_with, ScratchStorage, SystemStorage,
};
pub use transport::{probe_secure_transport, InterpreterTransport, SecureTransport, TransportError};

use std::fmt;

use serde::Serialize;

/// How usable a capability is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityStatus {
    /// Fully functional.
    Ok,
    /// Present but degraded or untrustworthy.
    Warn,
    /// Unusable.
    Fail,
}

impl CapabilityStatus {
    /// Lowercase name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for CapabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one capability probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityResult {
    /// Capability name, e.g. `filesystem_access` or `ssl`.
    pub capability: String,
    pub status: CapabilityStatus,
    /// Human-readable explanation of the status.
    pub detail: String,
}

impl CapabilityResult {
    pub fn ok(capability: &str, detail: impl Into<String>) -> Self {
        Self::new(capability, CapabilityStatus::Ok, detail)
    }

    pub fn warn(capability: &str, detail: impl Into<String>) -> Self {
        Self::new(capability, CapabilityStatus::Warn, detail)
    }

    pub fn fail(capability: &str, detail: impl Into<String>) -> Self {
        Self::new(capability, CapabilityStatus::Fail, detail)
    }

    fn new(capability: &str, status: CapabilityStatus, detail: impl Into<String>) -> Self {
        Self {
            capability: capability.to_string(),
            status,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for CapabilityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            CapabilityStatus::Ok => write!(f, "Capability ({}): OK", self.capability),
            status => write!(
                f,
                "Capability ({}): {} - {}",
                self.capability,
                status.as_str().to_uppercase(),
                self.detail
            ),
        }
    }
}
