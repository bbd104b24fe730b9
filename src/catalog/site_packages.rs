//! Installed distributions read straight from disk.
//!
//! Mirrors what `importlib.metadata.distributions()` sees: every
//! `*.dist-info` and `*.egg-info` entry in every directory of the
//! interpreter's import path.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{PycheckError, Result};
use crate::interpreter::Interpreter;

use super::{Distribution, DistributionIter, InstalledDistributionCatalog};

/// Distributions found under a set of import-path directories.
#[derive(Debug, Clone)]
pub struct SitePackagesCatalog {
    search_paths: Vec<PathBuf>,
}

impl SitePackagesCatalog {
    /// Catalog over explicit directories.
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Catalog over the interpreter's `sys.path` plus configured directories.
    ///
    /// If the interpreter cannot report its path, the configured directories
    /// are used alone; with none configured that is an error.
    pub fn for_interpreter(interpreter: &Interpreter, extra: &[PathBuf]) -> Result<Self> {
        let mut paths = match interpreter.search_paths() {
            Ok(paths) => paths,
            Err(e) if !extra.is_empty() => {
                tracing::warn!("using configured site paths only: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        for path in extra {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }
        Ok(Self::new(paths))
    }

    /// Directories that will be scanned.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl InstalledDistributionCatalog for SitePackagesCatalog {
    fn distributions(&self) -> Result<DistributionIter<'_>> {
        let mut found: Vec<Result<Box<dyn Distribution>>> = Vec::new();

        for dir in &self.search_paths {
            // Zip archives and missing entries on sys.path are normal.
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };

            let mut in_dir = Vec::new();
            for entry in entries {
                match entry {
                    Ok(entry) => {
                        if let Some(dist) = DistInfo::from_path(entry.path()) {
                            in_dir.push(dist);
                        }
                    }
                    Err(e) => found.push(Err(PycheckError::Discovery {
                        message: format!("unreadable entry in {}: {}", dir.display(), e),
                    })),
                }
            }
            in_dir.sort_by(|a, b| a.path.cmp(&b.path));
            found.extend(
                in_dir
                    .into_iter()
                    .map(|d| Ok(Box::new(d) as Box<dyn Distribution>)),
            );
        }

        Ok(Box::new(found.into_iter()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetadataLayout {
    /// `name-1.0.dist-info/` (wheel installs)
    DistInfo,
    /// `name-1.0.egg-info/` (setuptools installs)
    EggInfoDir,
    /// `name-1.0.egg-info` as a single `PKG-INFO` file (distutils installs)
    EggInfoFile,
}

/// Metadata directory (or file) of one installed distribution.
#[derive(Debug, Clone)]
pub struct DistInfo {
    path: PathBuf,
    layout: MetadataLayout,
}

impl DistInfo {
    /// Recognise a metadata entry by its name; anything else yields `None`.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let layout = if name.ends_with(".dist-info") && path.is_dir() {
            MetadataLayout::DistInfo
        } else if name.ends_with(".egg-info") {
            if path.is_dir() {
                MetadataLayout::EggInfoDir
            } else {
                MetadataLayout::EggInfoFile
            }
        } else {
            return None;
        };
        Some(Self { path, layout })
    }

    /// Location of the metadata entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_optional(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn metadata_text(&self) -> Result<Option<String>> {
        match self.layout {
            MetadataLayout::DistInfo => self.read_optional(&self.path.join("METADATA")),
            MetadataLayout::EggInfoDir => self.read_optional(&self.path.join("PKG-INFO")),
            MetadataLayout::EggInfoFile => self.read_optional(&self.path),
        }
    }

    /// `installed-files.txt` entries are relative to the egg-info directory;
    /// rebase them onto the directory that holds it.
    fn egg_installed_files(&self) -> Result<Option<Vec<String>>> {
        let Some(text) = self.read_optional(&self.path.join("installed-files.txt"))? else {
            return Ok(None);
        };
        let egg_dir = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let files = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| match l.strip_prefix("../") {
                Some(outside) => outside.to_string(),
                None => format!("{}/{}", egg_dir, l),
            })
            .collect();
        Ok(Some(files))
    }
}

impl Distribution for DistInfo {
    fn name(&self) -> Result<Option<String>> {
        Ok(self
            .metadata_text()?
            .and_then(|text| parse_metadata_name(&text)))
    }

    fn read_text(&self, file: &str) -> Result<Option<String>> {
        match self.layout {
            MetadataLayout::EggInfoFile => Ok(None),
            _ => self.read_optional(&self.path.join(file)),
        }
    }

    fn files(&self) -> Result<Option<Vec<String>>> {
        match self.layout {
            MetadataLayout::DistInfo => Ok(self
                .read_optional(&self.path.join("RECORD"))?
                .map(|text| parse_record(&text))),
            MetadataLayout::EggInfoDir => {
                if let Some(files) = self.egg_installed_files()? {
                    return Ok(Some(files));
                }
                Ok(self
                    .read_optional(&self.path.join("SOURCES.txt"))?
                    .map(|text| {
                        text.lines()
                            .map(str::trim)
                            .filter(|l| !l.is_empty())
                            .map(str::to_string)
                            .collect()
                    }))
            }
            MetadataLayout::EggInfoFile => Ok(None),
        }
    }
}

/// Value of the `Name:` header in core metadata (RFC 822 style).
///
/// Only the header block is searched; the description body after the first
/// blank line may contain anything.
pub fn parse_metadata_name(text: &str) -> Option<String> {
    for line in text.lines() {
        if line.trim().is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            if key.trim().eq_ignore_ascii_case("name") {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Paths listed in a wheel `RECORD` file (first CSV column).
pub fn parse_record(text: &str) -> Vec<String> {
    text.lines()
        .map(first_csv_field)
        .filter(|p| !p.is_empty())
        .collect()
}

/// First field of a CSV line, honouring `"quoted, fields"` and `""` escapes.
fn first_csv_field(line: &str) -> String {
    let line = line.trim_end_matches('\r');
    let Some(quoted) = line.strip_prefix('"') else {
        return line.split(',').next().unwrap_or_default().to_string();
    };

    let mut field = String::new();
    let mut chars = quoted.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if chars.peek() == Some(&'"') {
                field.push('"');
                chars.next();
            } else {
                break;
            }
        } else {
            field.push(c);
        }
    }
    field
}
