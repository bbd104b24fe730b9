//! Candidate name discovery.
//!
//! Turns what the catalogs report into the sorted, deduplicated list of
//! names a check will try to load. Discovery itself never loads anything and
//! never fails: a broken source degrades to fewer (or zero) candidates.

use std::collections::BTreeSet;

use crate::catalog::{Distribution, InstalledDistributionCatalog, StandardLibraryCatalog};
use crate::error::Result;
use crate::loader::contain;

/// Prefix marking a module as private to its package.
pub const PRIVATE_PREFIX: &str = "_";

/// Metadata file declaring a distribution's top-level import names.
pub const TOP_LEVEL_MANIFEST: &str = "top_level.txt";

/// Standard-library modules excluded from `OS` checks on every platform.
///
/// These are platform-exclusive, open windows or browsers when imported, or
/// belong to test and packaging tooling a sanity check has no business
/// touching.
pub const SKIP_SET: &[&str] = &[
    // GUI / optional
    "tkinter",
    "turtle",
    "idlelib",
    "turtledemo",
    // Test / dev
    "test",
    "lib2to3",
    "ensurepip",
    "venv",
    "distutils",
    // Unix-only
    "curses",
    "fcntl",
    "grp",
    "posix",
    "pty",
    "pwd",
    "readline",
    "resource",
    "syslog",
    "termios",
    "tty",
    "spwd",
    "crypt",
    // Windows-only
    "msvcrt",
    "winreg",
    "winsound",
    "nt",
    "msilib",
    // Side effects on import (antigravity opens a browser)
    "antigravity",
    "this",
    // Other optional
    "dbm",
    "ossaudiodev",
    "nis",
    "posixpath",
    "ntpath",
];

fn is_private(name: &str) -> bool {
    name.starts_with(PRIVATE_PREFIX)
}

fn is_skipped(name: &str, extra_skip: &[String]) -> bool {
    SKIP_SET.iter().any(|s| *s == name) || extra_skip.iter().any(|s| s == name)
}

/// Standard-library candidates for the `OS` scope.
///
/// Private names, [`SKIP_SET`] members and `extra_skip` names are removed;
/// the rest is returned in ascending byte order. A catalog that fails yields
/// an empty list.
pub fn list_os_candidates(
    catalog: &dyn StandardLibraryCatalog,
    extra_skip: &[String],
) -> Vec<String> {
    let names = match contain("stdlib catalog", || catalog.module_names()) {
        Some(Ok(names)) => names,
        Some(Err(e)) => {
            tracing::warn!("standard library enumeration failed: {}", e);
            return Vec::new();
        }
        None => return Vec::new(),
    };

    names
        .into_iter()
        .filter(|name| !name.is_empty() && !is_private(name) && !is_skipped(name, extra_skip))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Top-level import names of every installed distribution, for the `ALL` scope.
///
/// Each distribution is handled on its own: if reading its metadata errors
/// or panics, it contributes nothing and discovery moves on to the next.
/// If advancing the catalog iterator itself panics, enumeration stops there
/// and the names collected so far are kept; a panicked iterator is not
/// resumed.
pub fn list_all_candidates(catalog: &dyn InstalledDistributionCatalog) -> Vec<String> {
    let mut seen = BTreeSet::new();

    let Some(Ok(mut distributions)) = contain("distribution catalog", || catalog.distributions())
    else {
        tracing::warn!("installed distributions could not be enumerated");
        return Vec::new();
    };

    let mut index = 0usize;
    loop {
        let item = match contain("distribution iterator", || distributions.next()) {
            Some(Some(item)) => item,
            Some(None) => break,
            None => {
                tracing::warn!(
                    "distribution enumeration panicked after {} entries; keeping {} names",
                    index,
                    seen.len()
                );
                break;
            }
        };
        index += 1;

        let dist = match item {
            Ok(dist) => dist,
            Err(e) => {
                tracing::debug!("skipping distribution #{}: {}", index, e);
                continue;
            }
        };

        match contain("distribution metadata", || distribution_names(dist.as_ref())) {
            Some(Ok(names)) => seen.extend(names),
            Some(Err(e)) => tracing::debug!("skipping distribution #{}: {}", index, e),
            None => tracing::debug!("skipping distribution #{}: metadata access panicked", index),
        }
    }

    seen.into_iter().collect()
}

/// Candidate names contributed by one distribution.
///
/// A non-empty top-level manifest is authoritative. Without one, names come
/// from the first segment of every installed file plus the normalized
/// distribution name.
fn distribution_names(dist: &dyn Distribution) -> Result<Vec<String>> {
    // An unreadable manifest is treated like a missing one.
    if let Ok(Some(manifest)) = dist.read_text(TOP_LEVEL_MANIFEST) {
        if !manifest.is_empty() {
            return Ok(manifest
                .lines()
                .map(str::trim)
                .filter(|name| !name.is_empty() && !is_private(name))
                .map(str::to_string)
                .collect());
        }
    }

    let mut names = Vec::new();
    if let Some(files) = dist.files()? {
        names.extend(
            files
                .iter()
                .filter_map(|f| top_level_from_file(f))
                .filter(|name| !is_private(name)),
        );
    }

    if let Some(dist_name) = dist.name()? {
        if !dist_name.is_empty() {
            names.push(normalize_dist_name(&dist_name));
        }
    }

    Ok(names)
}

/// Importable name implied by an installed file path.
fn top_level_from_file(path: &str) -> Option<String> {
    let normalized = path.replace('\\', "/");
    let first = normalized.split('/').next()?;
    let name = first.strip_suffix(".py").unwrap_or(first);
    (!name.is_empty()).then(|| name.to_string())
}

/// `Foo-Bar` → `foo_bar`.
pub fn normalize_dist_name(name: &str) -> String {
    name.replace('-', "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DistributionIter;
    use crate::error::PycheckError;

    struct FixedStdlib(Vec<&'static str>);

    impl StandardLibraryCatalog for FixedStdlib {
        fn module_names(&self) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    struct BrokenStdlib;

    impl StandardLibraryCatalog for BrokenStdlib {
        fn module_names(&self) -> Result<Vec<String>> {
            Err(PycheckError::Discovery {
                message: "stdlib directory unreadable".into(),
            })
        }
    }

    #[derive(Default)]
    struct FakeDist {
        name: Option<&'static str>,
        top_level: Option<&'static str>,
        files: Option<Vec<&'static str>>,
    }

    impl Distribution for FakeDist {
        fn name(&self) -> Result<Option<String>> {
            Ok(self.name.map(str::to_string))
        }

        fn read_text(&self, file: &str) -> Result<Option<String>> {
            assert_eq!(file, TOP_LEVEL_MANIFEST);
            Ok(self.top_level.map(str::to_string))
        }

        fn files(&self) -> Result<Option<Vec<String>>> {
            Ok(self
                .files
                .as_ref()
                .map(|f| f.iter().map(|s| s.to_string()).collect()))
        }
    }

    struct FakeCatalog(Vec<FakeDist>);

    impl InstalledDistributionCatalog for FakeCatalog {
        fn distributions(&self) -> Result<DistributionIter<'_>> {
            Ok(Box::new(self.0.iter().map(|d| {
                Ok::<_, PycheckError>(Box::new(FakeDist {
                    name: d.name,
                    top_level: d.top_level,
                    files: d.files.clone(),
                }) as Box<dyn Distribution>)
            })))
        }
    }

    #[test]
    fn os_candidates_are_filtered_and_sorted() {
        let catalog = FixedStdlib(vec!["zlib", "_thread", "antigravity", "json", "os", "Json"]);
        assert_eq!(
            list_os_candidates(&catalog, &[]),
            vec!["Json", "json", "os", "zlib"]
        );
    }

    #[test]
    fn os_candidates_never_include_skip_set() {
        let catalog = FixedStdlib(SKIP_SET.to_vec());
        assert!(list_os_candidates(&catalog, &[]).is_empty());
    }

    #[test]
    fn extra_skip_names_are_removed() {
        let catalog = FixedStdlib(vec!["json", "sqlite3"]);
        let extra = vec!["sqlite3".to_string()];
        assert_eq!(list_os_candidates(&catalog, &extra), vec!["json"]);
    }

    #[test]
    fn broken_stdlib_catalog_yields_nothing() {
        assert!(list_os_candidates(&BrokenStdlib, &[]).is_empty());
    }

    #[test]
    fn top_level_manifest_is_authoritative() {
        let catalog = FakeCatalog(vec![FakeDist {
            name: Some("PyYAML"),
            top_level: Some("_yaml\nyaml\n\n"),
            files: Some(vec!["ignored/__init__.py"]),
        }]);
        assert_eq!(list_all_candidates(&catalog), vec!["yaml"]);
    }

    #[test]
    fn empty_manifest_falls_through_to_files() {
        let catalog = FakeCatalog(vec![FakeDist {
            name: Some("six"),
            top_level: Some(""),
            files: Some(vec!["six.py"]),
        }]);
        assert_eq!(list_all_candidates(&catalog), vec!["six"]);
    }

    #[test]
    fn whitespace_manifest_still_counts_as_declared() {
        let catalog = FakeCatalog(vec![FakeDist {
            name: Some("empty-shell"),
            top_level: Some("  \n"),
            files: Some(vec!["empty_shell/__init__.py"]),
        }]);
        assert!(list_all_candidates(&catalog).is_empty());
    }

    #[test]
    fn files_and_normalized_name_without_manifest() {
        let catalog = FakeCatalog(vec![FakeDist {
            name: Some("Typing-Extensions"),
            top_level: None,
            files: Some(vec![
                "typing_extensions.py",
                "__pycache__/typing_extensions.cpython-312.pyc",
                "win\\path.py",
            ]),
        }]);
        assert_eq!(
            list_all_candidates(&catalog),
            vec!["typing_extensions", "win"]
        );
    }

    #[test]
    fn names_are_deduplicated_across_distributions() {
        let catalog = FakeCatalog(vec![
            FakeDist {
                top_level: Some("google"),
                ..Default::default()
            },
            FakeDist {
                top_level: Some("google\nprotobuf"),
                ..Default::default()
            },
        ]);
        assert_eq!(list_all_candidates(&catalog), vec!["google", "protobuf"]);
    }

    /// Yields one distribution, then panics on the next advance.
    struct PanicsMidway;

    impl InstalledDistributionCatalog for PanicsMidway {
        fn distributions(&self) -> Result<DistributionIter<'_>> {
            let mut step = 0;
            Ok(Box::new(std::iter::from_fn(move || {
                step += 1;
                match step {
                    1 => Some(Ok::<_, PycheckError>(Box::new(FakeDist {
                        top_level: Some("before"),
                        ..Default::default()
                    }) as Box<dyn Distribution>)),
                    2 => panic!("metadata index corrupted"),
                    3 => Some(Ok::<_, PycheckError>(Box::new(FakeDist {
                        top_level: Some("after"),
                        ..Default::default()
                    }) as Box<dyn Distribution>)),
                    _ => None,
                }
            })))
        }
    }

    #[test]
    fn iterator_panic_stops_enumeration_and_keeps_earlier_names() {
        assert_eq!(list_all_candidates(&PanicsMidway), vec!["before"]);
    }

    #[test]
    fn normalize_lowercases_and_underscores() {
        assert_eq!(normalize_dist_name("Foo-Bar-Baz"), "foo_bar_baz");
    }

    #[test]
    fn top_level_from_file_strips_extension() {
        assert_eq!(top_level_from_file("attr/__init__.py"), Some("attr".into()));
        assert_eq!(top_level_from_file("decorator.py"), Some("decorator".into()));
        assert_eq!(top_level_from_file(""), None);
    }
}
