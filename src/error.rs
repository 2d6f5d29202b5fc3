//! Error types for binary selection and loading.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Standing help text explaining where binaries go and how they are named.
pub fn help_message(binary_dir: &Path) -> String {
    format!(
        "To add a new Tkhtml version, drop your binary into the {} folder, named using the following conventions:\n\
         - For a standard release: libTkhtml[major_version.minor_version].[dll/dylib/so] (eg. libTkhtml3.0.dll)\n\
         - For an experimental release: libTkhtml[major_version.minor_version]exp.[dll/dylib/so] (eg. libTkhtml3.1exp.dll)",
        binary_dir.display()
    )
}

#[derive(Debug, Error)]
pub enum TkhtmlError {
    #[error("Tkhtml version {version} either does not exist or is unsupported on your system. {}", help_message(.binary_dir))]
    UnsupportedVersion { version: String, binary_dir: PathBuf },

    #[error("Tkhtml version {version} is an experimental release but experimental mode is disabled. {}", help_message(.binary_dir))]
    ExperimentalDisabled { version: String, binary_dir: PathBuf },

    #[error("Tkhtml version {version} is not an experimental release but experimental mode is enabled. {}", help_message(.binary_dir))]
    ExperimentalMismatch { version: String, binary_dir: PathBuf },

    #[error("No experimental Tkhtml versions could be found on your system. {}", help_message(.binary_dir))]
    NoExperimentalAvailable { binary_dir: PathBuf },

    #[error("No Tkhtml binary at index {index} ({available} available). {}", help_message(.binary_dir))]
    IndexOutOfRange {
        index: i64,
        available: usize,
        binary_dir: PathBuf,
    },

    #[error("Could not list Tkhtml binaries in {}", .binary_dir.display())]
    Catalog {
        binary_dir: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Could not add {} to the {variable} search path", .dir.display())]
    SearchPathUpdate {
        dir: PathBuf,
        variable: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("The interpreter refused to load {}", .path.display())]
    HostLoadRejected {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Tkhtml is not loaded")]
    NotLoaded {
        #[source]
        source: anyhow::Error,
    },

    #[error("The interpreter could not find the Tkhtml package")]
    PackageNotFound {
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T, E = TkhtmlError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_message_names_directory() {
        let help = help_message(Path::new("/opt/tkhtml/win32"));
        assert!(help.contains("/opt/tkhtml/win32 folder"));
        assert!(help.contains("libTkhtml3.0.dll"));
        assert!(help.contains("libTkhtml3.1exp.dll"));
    }

    #[test]
    fn test_selection_errors_include_version_and_help() {
        let err = TkhtmlError::ExperimentalDisabled {
            version: "3.1".into(),
            binary_dir: PathBuf::from("/opt/tkhtml/win32"),
        };
        let message = err.to_string();
        assert!(message.starts_with("Tkhtml version 3.1 is an experimental release"));
        assert!(message.contains("To add a new Tkhtml version"));
    }

    #[test]
    fn test_host_errors_keep_source() {
        let err = TkhtmlError::NotLoaded {
            source: anyhow::anyhow!("package Tkhtml is not present"),
        };
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "package Tkhtml is not present");
    }
}
