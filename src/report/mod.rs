//! Run reports: the JSON document, its entries, and the exit code.
//!
//! # Modules
//!
//! - [`sanitize`] - Home directory and username masking

pub mod sanitize;

pub use sanitize::Sanitizer;

use serde::Serialize;
use serde_json::{json, Value};

use crate::capability::{CapabilityResult, CapabilityStatus};
use crate::check::{CheckOutcome, Scope};
use crate::interpreter::PythonInfo;

/// Every check passed and no capability failed.
pub const EXIT_OK: i32 = 0;
/// A check or capability failed.
pub const EXIT_FAILED: i32 = 1;
/// pycheck itself could not run.
pub const EXIT_SETUP: i32 = 2;

/// Kind of a report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Check,
    Capability,
}

/// One line of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ReportEntry {
    /// Entry for a scope check. `ALL` passes carry the success count.
    pub fn check(scope: Scope, outcome: &CheckOutcome) -> Self {
        Self {
            name: scope.to_string(),
            kind: EntryKind::Check,
            status: if outcome.is_passing() { "ok" } else { "fail" }.to_string(),
            detail: outcome
                .libraries_passed()
                .map(|n| json!({ "libraries_passed": n })),
        }
    }

    /// Entry for a capability probe.
    pub fn capability(result: &CapabilityResult) -> Self {
        Self {
            name: result.capability.clone(),
            kind: EntryKind::Capability,
            status: result.status.to_string(),
            detail: Some(Value::String(result.detail.clone())),
        }
    }
}

/// The full JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub pycheck_version: String,
    pub python: Option<PythonInfo>,
    pub results: Vec<ReportEntry>,
    pub exit_code: i32,
}

impl Report {
    /// Assemble a report and compute its exit code.
    pub fn new(
        python: Option<PythonInfo>,
        checks: &[(Scope, CheckOutcome)],
        capabilities: &[CapabilityResult],
        strict: bool,
    ) -> Self {
        let outcomes: Vec<CheckOutcome> = checks.iter().map(|(_, o)| *o).collect();
        let results = checks
            .iter()
            .map(|(scope, outcome)| ReportEntry::check(*scope, outcome))
            .chain(capabilities.iter().map(ReportEntry::capability))
            .collect();

        Self {
            pycheck_version: env!("CARGO_PKG_VERSION").to_string(),
            python,
            results,
            exit_code: exit_code(&outcomes, capabilities, strict),
        }
    }

    /// The report as JSON with every string sanitized.
    pub fn to_json(&self, sanitizer: &Sanitizer) -> serde_json::Result<Value> {
        Ok(sanitizer.sanitize_value(serde_json::to_value(self)?))
    }
}

/// Exit code for a run.
///
/// A check that is not passing or a failed capability gives
/// [`EXIT_FAILED`]. A capability warning does too, but only when `strict`.
pub fn exit_code(checks: &[CheckOutcome], capabilities: &[CapabilityResult], strict: bool) -> i32 {
    let checks_failed = checks.iter().any(|o| !o.is_passing());
    let capability_failed = capabilities.iter().any(|c| match c.status {
        CapabilityStatus::Ok => false,
        CapabilityStatus::Warn => strict,
        CapabilityStatus::Fail => true,
    });

    if checks_failed || capability_failed {
        EXIT_FAILED
    } else {
        EXIT_OK
    }
}
