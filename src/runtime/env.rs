//! Environment and process information operations.

use anyhow::{Context, Result};
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_impl(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_os_impl(&self, key: &str) -> Option<OsString> {
        env::var_os(key)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn set_env_var_impl(&self, key: &str, value: &OsStr) -> Result<()> {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            anyhow::bail!("Invalid environment variable name: {:?}", key);
        }
        // SAFETY: the loader is documented as single-threaded and only
        // mutates the environment from the interpreter's owning thread.
        unsafe {
            env::set_var(key, value);
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn current_exe_impl(&self) -> Result<PathBuf> {
        env::current_exe().context("Failed to locate the running executable")
    }
}
