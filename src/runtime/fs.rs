//! File system operations (directory listing, reads).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn read_dir_impl(&self, path: &Path) -> Result<Vec<PathBuf>> {
        fs::read_dir(path)
            .with_context(|| format!("Failed to read directory {}", path.display()))?
            .map(|entry| Ok(entry?.path()))
            .collect()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_impl(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_dir_impl(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_dir_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("libTkhtml3.0.so"), b"not really elf").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        assert!(runtime.is_dir(dir.path()));

        let mut entries = runtime.read_dir(dir.path()).unwrap();
        entries.sort();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].ends_with("libTkhtml3.0.so"));
        assert!(entries[1].ends_with("nested"));

        let content = runtime.read(&entries[0]).unwrap();
        assert_eq!(content, b"not really elf");
    }

    #[test]
    fn test_real_runtime_errors() {
        let runtime = RealRuntime;

        let missing = std::path::Path::new("/nonexistent/tkhtml/dir");
        assert!(runtime.read_dir(missing).is_err());
        assert!(runtime.read(&missing.join("libTkhtml3.0.so")).is_err());
        assert!(!runtime.is_dir(missing));
    }
}
