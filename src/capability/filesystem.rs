//! Temporary-storage round trip.
//!
//! The probe creates a private temporary directory, writes a known payload
//! into it and reads it back. The directory is a [`TempDir`], so it is
//! removed when the probe returns, whichever branch it returns from, and
//! during unwinding.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::CapabilityResult;
use crate::loader::contain;

/// Capability name reported by this probe.
pub const CAPABILITY: &str = "filesystem_access";

/// Payload written and expected back.
pub const PAYLOAD: &str = "pycheck";

/// File the payload is written to inside the scratch directory.
pub const PROBE_FILE: &str = "pycheck_probe.txt";

const PERMISSION_DENIED: &str = "Permission denied: cannot write to the temporary directory.";
const MISMATCH: &str = "Filesystem issue: read-back content did not match written data.";
const SUCCESS: &str = "Temporary directory write/read succeeded.";
const STORAGE_PANICKED: &str = "Filesystem issue: storage backend panicked.";

/// The three storage operations the probe performs.
///
/// Every method has a real default, so a test double overrides only the
/// stage it wants to break.
pub trait ScratchStorage {
    /// Directory the scratch directory is created under; `None` for the
    /// system temporary directory.
    fn parent_dir(&self) -> Option<&Path> {
        None
    }

    /// Create the scratch directory.
    fn acquire(&self) -> io::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("pycheck");
        match self.parent_dir() {
            Some(dir) => builder.tempdir_in(dir),
            None => builder.tempdir(),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Real storage, optionally rooted somewhere other than the system default.
#[derive(Debug, Clone, Default)]
pub struct SystemStorage {
    scratch_dir: Option<PathBuf>,
}

impl SystemStorage {
    pub fn new(scratch_dir: Option<PathBuf>) -> Self {
        Self { scratch_dir }
    }
}

impl ScratchStorage for SystemStorage {
    fn parent_dir(&self) -> Option<&Path> {
        self.scratch_dir.as_deref()
    }
}

/// Probe the system temporary directory.
pub fn probe_filesystem_access() -> CapabilityResult {
    probe_filesystem_access_with(&SystemStorage::default())
}

/// Probe through the given storage.
///
/// Permission denied while creating the directory or writing the file is a
/// `fail`. Any other I/O error, a read-back that differs from what was
/// written, and a storage backend that panics are a `warn`.
pub fn probe_filesystem_access_with(storage: &dyn ScratchStorage) -> CapabilityResult {
    contain("scratch storage", || round_trip(storage))
        .unwrap_or_else(|| CapabilityResult::warn(CAPABILITY, STORAGE_PANICKED))
}

fn round_trip(storage: &dyn ScratchStorage) -> CapabilityResult {
    let scratch = match storage.acquire() {
        Ok(dir) => dir,
        Err(e) => return classify_write_error(&e),
    };
    let probe = scratch.path().join(PROBE_FILE);

    if let Err(e) = storage.write(&probe, PAYLOAD) {
        return classify_write_error(&e);
    }

    let result = match storage.read(&probe) {
        Ok(data) if data == PAYLOAD => CapabilityResult::ok(CAPABILITY, SUCCESS),
        Ok(data) => {
            tracing::debug!("probe read back {} bytes, expected {}", data.len(), PAYLOAD.len());
            CapabilityResult::warn(CAPABILITY, MISMATCH)
        }
        Err(e) => CapabilityResult::warn(CAPABILITY, format!("Filesystem issue: {}", e)),
    };

    if let Err(e) = scratch.close() {
        tracing::debug!("failed to remove scratch directory: {}", e);
    }
    result
}

fn classify_write_error(e: &io::Error) -> CapabilityResult {
    if e.kind() == io::ErrorKind::PermissionDenied {
        CapabilityResult::fail(CAPABILITY, PERMISSION_DENIED)
    } else {
        CapabilityResult::warn(CAPABILITY, format!("Filesystem issue: {}", e))
    }
}
