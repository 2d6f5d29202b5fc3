//! Selection of one binary from a catalog.
//!
//! A request either names a version (matched as a substring of the file
//! name) or asks for the best available binary by index into the sorted
//! working set. Version requests take priority; `index` only applies when no
//! version is given.

use log::debug;
use std::fmt;
use std::str::FromStr;

use super::catalog::{BinaryCatalog, BinaryDescriptor};
use super::naming;
use crate::error::{Result, TkhtmlError};

/// Which release channel a request accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperimentalMode {
    /// Standard releases only.
    #[default]
    Stable,
    /// Experimental releases only.
    Experimental,
    /// Either channel; adopts whatever the chosen file is.
    Auto,
}

impl From<bool> for ExperimentalMode {
    fn from(experimental: bool) -> Self {
        if experimental {
            ExperimentalMode::Experimental
        } else {
            ExperimentalMode::Stable
        }
    }
}

impl FromStr for ExperimentalMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "false" | "stable" | "no" | "0" => Ok(ExperimentalMode::Stable),
            "true" | "experimental" | "yes" | "1" => Ok(ExperimentalMode::Experimental),
            "auto" => Ok(ExperimentalMode::Auto),
            other => Err(format!(
                "invalid experimental mode '{}', expected true, false or auto",
                other
            )),
        }
    }
}

impl fmt::Display for ExperimentalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExperimentalMode::Stable => "false",
            ExperimentalMode::Experimental => "true",
            ExperimentalMode::Auto => "auto",
        };
        f.write_str(s)
    }
}

/// What the caller wants loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectRequest {
    pub version: Option<String>,
    /// Position in the sorted working set; negative values count from the end.
    pub index: i64,
    pub experimental: ExperimentalMode,
}

impl Default for SelectRequest {
    fn default() -> Self {
        Self {
            version: None,
            index: -1,
            experimental: ExperimentalMode::Stable,
        }
    }
}

impl SelectRequest {
    /// Highest available standard release.
    pub fn latest() -> Self {
        Self::default()
    }

    pub fn version(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn with_index(mut self, index: i64) -> Self {
        self.index = index;
        self
    }

    pub fn with_experimental(mut self, experimental: impl Into<ExperimentalMode>) -> Self {
        self.experimental = experimental.into();
        self
    }
}

/// Picks a binary out of a catalog.
pub struct BinarySelector<'a> {
    catalog: &'a BinaryCatalog,
}

impl<'a> BinarySelector<'a> {
    pub fn new(catalog: &'a BinaryCatalog) -> Self {
        Self { catalog }
    }

    pub fn select(&self, request: &SelectRequest) -> Result<BinaryDescriptor> {
        let selected = match request.version.as_deref().filter(|v| !v.is_empty()) {
            Some(version) => self.select_version(version, request.experimental)?,
            None => self.select_best(request.index, request.experimental)?,
        };
        debug!(
            "Selected Tkhtml {} (experimental: {}) at {}",
            selected.version,
            selected.experimental,
            selected.path.display()
        );
        Ok(selected)
    }

    fn select_version(&self, version: &str, mode: ExperimentalMode) -> Result<BinaryDescriptor> {
        let file = self
            .catalog
            .files()
            .iter()
            .find(|name| name.contains(version))
            .ok_or_else(|| TkhtmlError::UnsupportedVersion {
                version: version.to_string(),
                binary_dir: self.catalog.dir().to_path_buf(),
            })?;

        let experimental = naming::is_experimental(file);
        match (experimental, mode) {
            (true, ExperimentalMode::Stable) => Err(TkhtmlError::ExperimentalDisabled {
                version: version.to_string(),
                binary_dir: self.catalog.dir().to_path_buf(),
            }),
            (false, ExperimentalMode::Experimental) => Err(TkhtmlError::ExperimentalMismatch {
                version: version.to_string(),
                binary_dir: self.catalog.dir().to_path_buf(),
            }),
            _ => Ok(BinaryDescriptor {
                path: self.catalog.path_of(file),
                version: version.to_string(),
                experimental,
            }),
        }
    }

    fn select_best(&self, index: i64, mode: ExperimentalMode) -> Result<BinaryDescriptor> {
        let working: Vec<&String> = match mode {
            ExperimentalMode::Experimental => {
                let files: Vec<_> = self
                    .catalog
                    .files()
                    .iter()
                    .filter(|name| naming::is_experimental(name))
                    .collect();
                if files.is_empty() {
                    return Err(TkhtmlError::NoExperimentalAvailable {
                        binary_dir: self.catalog.dir().to_path_buf(),
                    });
                }
                files
            }
            ExperimentalMode::Stable => self
                .catalog
                .files()
                .iter()
                .filter(|name| !naming::is_experimental(name))
                .collect(),
            ExperimentalMode::Auto => self.catalog.files().iter().collect(),
        };

        let position =
            resolve_index(working.len(), index).ok_or_else(|| TkhtmlError::IndexOutOfRange {
                index,
                available: working.len(),
                binary_dir: self.catalog.dir().to_path_buf(),
            })?;

        Ok(self.catalog.describe(working[position]))
    }
}

/// Turn a possibly negative index into a position in a slice of `len`.
fn resolve_index(len: usize, index: i64) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let position = if index < 0 { len + index } else { index };
    if (0..len).contains(&position) {
        usize::try_from(position).ok()
    } else {
        None
    }
}
