//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over the few OS services
//! the loader touches, enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `path` - Search-path helpers (membership check, prepend)
//! - `env` - Environment variables and the running executable
//! - `fs` - File system reads (directory listing, file contents)

mod env;
mod fs;
pub mod path;

use anyhow::Result;
use std::env as std_env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

pub use path::{contains_dir, prepend_dir};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
    fn env_var_os(&self, key: &str) -> Option<OsString>;

    /// Overwrite a process environment variable.
    ///
    /// Callers must not race this against other threads reading the
    /// environment; the loader only calls it from the interpreter's thread.
    fn set_env_var(&self, key: &str, value: &OsStr) -> Result<()>;

    fn current_exe(&self) -> Result<PathBuf>;

    // File System
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn is_dir(&self, path: &Path) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn env_var_os(&self, key: &str) -> Option<OsString> {
        self.env_var_os_impl(key)
    }

    fn set_env_var(&self, key: &str, value: &OsStr) -> Result<()> {
        self.set_env_var_impl(key, value)
    }

    fn current_exe(&self) -> Result<PathBuf> {
        self.current_exe_impl()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.read_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }
}
