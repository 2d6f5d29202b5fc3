//! Handing a resolved binary to the host interpreter.

use log::{debug, info};
use std::path::Path;

use crate::error::{Result, TkhtmlError};
use crate::interp::{Interpreter, PACKAGE_NAME};
use crate::runtime::{self, Runtime};

/// Environment variable searched for the binary's dependent libraries.
pub const SEARCH_PATH_VAR: &str = "PATH";

pub struct Loader<'a, R: Runtime + ?Sized> {
    runtime: &'a R,
}

impl<'a, R: Runtime + ?Sized> Loader<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    /// Put the binary's directory on the search path, then `load` it.
    ///
    /// The directory is prepended so it wins over system copies, and only
    /// when it is not already listed.
    #[tracing::instrument(skip(self, interp))]
    pub fn load_file<I: Interpreter + ?Sized>(&self, interp: &I, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            self.ensure_on_search_path(dir)
                .map_err(|source| TkhtmlError::SearchPathUpdate {
                    dir: dir.to_path_buf(),
                    variable: SEARCH_PATH_VAR,
                    source,
                })?;
        }

        interp
            .load(path)
            .map_err(|source| TkhtmlError::HostLoadRejected {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Loaded Tkhtml binary {}", path.display());
        Ok(())
    }

    /// Returns true when the search path was changed.
    fn ensure_on_search_path(&self, dir: &Path) -> anyhow::Result<bool> {
        let current = self.runtime.env_var_os(SEARCH_PATH_VAR);
        if runtime::contains_dir(current.as_deref(), dir) {
            debug!("{} already on {}", dir.display(), SEARCH_PATH_VAR);
            return Ok(false);
        }

        let updated = runtime::prepend_dir(current.as_deref(), dir)?;
        self.runtime.set_env_var(SEARCH_PATH_VAR, &updated)?;
        debug!("Prepended {} to {}", dir.display(), SEARCH_PATH_VAR);
        Ok(true)
    }

    /// Version of the Tkhtml package already loaded into `interp`.
    pub fn query_loaded_version<I: Interpreter + ?Sized>(&self, interp: &I) -> Result<String> {
        interp
            .present(PACKAGE_NAME)
            .map_err(|source| TkhtmlError::NotLoaded { source })
    }

    /// Let the interpreter find and load Tkhtml on its own.
    pub fn require_by_name<I: Interpreter + ?Sized>(&self, interp: &I) -> Result<String> {
        let version = interp
            .require(PACKAGE_NAME)
            .map_err(|source| TkhtmlError::PackageNotFound { source })?;
        info!("Interpreter provided Tkhtml {}", version);
        Ok(version)
    }
}
