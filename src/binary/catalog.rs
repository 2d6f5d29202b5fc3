use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::naming;
use crate::error::{Result, TkhtmlError};
use crate::runtime::Runtime;

/// A concrete binary: where it lives, which version it is, which channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryDescriptor {
    pub path: PathBuf,
    pub version: String,
    pub experimental: bool,
}

/// The candidate binaries found in one platform directory.
///
/// File names are kept in lexical order, which is also the order used to
/// rank versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryCatalog {
    dir: PathBuf,
    files: Vec<String>,
}

impl BinaryCatalog {
    /// Build a catalog from a list of file names, keeping only candidates.
    pub fn new<I, S>(dir: impl Into<PathBuf>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<String> = files
            .into_iter()
            .map(Into::into)
            .filter(|name| naming::is_candidate(name))
            .collect();
        files.sort();
        Self {
            dir: dir.into(),
            files,
        }
    }

    /// List `dir` once and keep the candidate file names.
    #[tracing::instrument(skip(runtime))]
    pub fn scan<R: Runtime + ?Sized>(runtime: &R, dir: &Path) -> Result<Self> {
        let entries = runtime
            .read_dir(dir)
            .map_err(|source| TkhtmlError::Catalog {
                binary_dir: dir.to_path_buf(),
                source,
            })?;

        let names = entries.iter().filter_map(|entry| {
            entry
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
        });
        let catalog = Self::new(dir, names);
        debug!(
            "Found {} Tkhtml binaries in {}: {:?}",
            catalog.files.len(),
            dir.display(),
            catalog.files
        );
        Ok(catalog)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Describe a file name using its own version and channel.
    pub fn describe(&self, file_name: &str) -> BinaryDescriptor {
        BinaryDescriptor {
            path: self.path_of(file_name),
            version: naming::version_of(file_name),
            experimental: naming::is_experimental(file_name),
        }
    }

    /// Every candidate, in lexical order.
    pub fn descriptors(&self) -> impl Iterator<Item = BinaryDescriptor> + '_ {
        self.files.iter().map(|name| self.describe(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, RealRuntime};
    use mockall::predicate::eq;
    use tempfile::tempdir;

    #[test]
    fn test_new_filters_and_sorts() {
        let catalog = BinaryCatalog::new(
            "/opt/tkhtml/win32",
            ["libTkhtml3.1exp.dll", "README.txt", "libTkhtml3.0.dll", "tcl86t.dll"],
        );

        assert_eq!(catalog.files(), ["libTkhtml3.0.dll", "libTkhtml3.1exp.dll"]);
        assert_eq!(catalog.dir(), Path::new("/opt/tkhtml/win32"));
    }

    #[test]
    fn test_scan_uses_runtime_listing() {
        // --- Setup ---
        let dir = PathBuf::from("/opt/tkhtml/manylinux1_x86_64");
        let mut runtime = MockRuntime::new();
        let listed = vec![
            dir.join("libTkhtml3.1.so"),
            dir.join("libTkhtml3.0.so"),
            dir.join("__init__.py"),
        ];
        runtime
            .expect_read_dir()
            .with(eq(dir.clone()))
            .times(1)
            .returning(move |_| Ok(listed.clone()));

        // --- Execute & Verify ---
        let catalog = BinaryCatalog::scan(&runtime, &dir).unwrap();
        assert_eq!(catalog.files(), ["libTkhtml3.0.so", "libTkhtml3.1.so"]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_dir()
            .returning(|_| Err(anyhow::anyhow!("No such file or directory")));

        let err = BinaryCatalog::scan(&runtime, Path::new("/missing")).unwrap_err();
        assert!(matches!(err, TkhtmlError::Catalog { .. }));
    }

    #[test]
    fn test_scan_real_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("libTkhtml3.0.so"), b"").unwrap();
        std::fs::write(dir.path().join("libTkhtml3.1exp.so"), b"").unwrap();
        std::fs::write(dir.path().join("notes.md"), b"").unwrap();

        let catalog = BinaryCatalog::scan(&RealRuntime, dir.path()).unwrap();
        assert_eq!(catalog.files(), ["libTkhtml3.0.so", "libTkhtml3.1exp.so"]);
    }

    #[test]
    fn test_descriptors() {
        let catalog = BinaryCatalog::new("/tk", ["libTkhtml3.1exp.so", "libTkhtml3.0.so"]);
        let descriptors: Vec<_> = catalog.descriptors().collect();

        assert_eq!(
            descriptors,
            vec![
                BinaryDescriptor {
                    path: PathBuf::from("/tk/libTkhtml3.0.so"),
                    version: "3.0".into(),
                    experimental: false,
                },
                BinaryDescriptor {
                    path: PathBuf::from("/tk/libTkhtml3.1exp.so"),
                    version: "3.1".into(),
                    experimental: true,
                },
            ]
        );
    }
}
