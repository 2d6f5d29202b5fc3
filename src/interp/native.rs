//! A stand-alone interpreter that loads libraries straight into the process.
//!
//! Used by the `tkhtml` CLI and by embedders without a Tcl interpreter. It
//! follows Tcl's `load` conventions: the package name and version come from
//! the file name (`libTkhtml3.0.so` provides `Tkhtml 3.0`) and the library
//! must export `<Name>_Init`.

use anyhow::{Context, Result, anyhow, bail};
use libloading::Library;
use log::{debug, info};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{c_int, c_void};
use std::path::{Path, PathBuf};

use super::Interpreter;
use crate::binary::naming;
use crate::runtime::{RealRuntime, Runtime};

struct LoadedPackage {
    version: String,
    path: PathBuf,
    _library: Library,
}

pub struct NativeInterpreter<R: Runtime = RealRuntime> {
    runtime: R,
    auto_path: Vec<PathBuf>,
    packages: RefCell<HashMap<String, LoadedPackage>>,
}

impl<R: Runtime> NativeInterpreter<R> {
    pub fn new(runtime: R) -> Self {
        Self {
            runtime,
            auto_path: Vec::new(),
            packages: RefCell::new(HashMap::new()),
        }
    }

    /// Directories searched by [`Interpreter::require`].
    pub fn with_auto_path(mut self, auto_path: Vec<PathBuf>) -> Self {
        self.auto_path = auto_path;
        self
    }

    pub fn auto_path(&self) -> &[PathBuf] {
        &self.auto_path
    }

    /// Highest stable `lib<package>*.<ext>` on the auto_path.
    ///
    /// Experimental builds are never picked by name.
    fn find_in_auto_path(&self, package: &str) -> Option<PathBuf> {
        let prefix = format!("lib{}", package);
        let suffix = format!(".{}", std::env::consts::DLL_EXTENSION);

        let mut found: Vec<PathBuf> = self
            .auto_path
            .iter()
            .filter_map(|dir| match self.runtime.read_dir(dir) {
                Ok(entries) => Some(entries),
                Err(e) => {
                    debug!("Skipping auto_path entry {}: {:#}", dir.display(), e);
                    None
                }
            })
            .flatten()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| {
                        name.starts_with(&prefix)
                            && name.ends_with(&suffix)
                            && !naming::is_experimental(name)
                    })
            })
            .collect();

        found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        found.pop()
    }
}

impl<R: Runtime> Interpreter for NativeInterpreter<R> {
    #[tracing::instrument(skip(self))]
    fn load(&self, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Invalid library path: {}", path.display()))?;
        let (package, version) = package_identity(file_name)
            .ok_or_else(|| anyhow!("Cannot derive a package name from {}", file_name))?;

        if let Some(loaded) = self.packages.borrow().get(&package) {
            if loaded.path == path {
                debug!("{} is already loaded", path.display());
                return Ok(());
            }
            bail!(
                "package {} {} is already loaded from {}",
                package,
                loaded.version,
                loaded.path.display()
            );
        }

        let bytes = self.runtime.read(path)?;
        check_native_object(&bytes)
            .with_context(|| format!("{} is not loadable on this platform", path.display()))?;

        // SAFETY: loading a library runs its initializers. The file was
        // checked to be a native shared object for this platform.
        let library = unsafe { Library::new(path) }
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let init_symbol = format!("{}_Init\0", package);
        // SAFETY: the symbol is only looked up, never called.
        unsafe {
            library.get::<unsafe extern "C" fn(*mut c_void) -> c_int>(init_symbol.as_bytes())
        }
        .with_context(|| {
            format!(
                "{} does not export {}_Init",
                path.display(),
                package
            )
        })?;

        info!("Loaded {} {} from {}", package, version, path.display());
        self.packages.borrow_mut().insert(
            package,
            LoadedPackage {
                version,
                path: path.to_path_buf(),
                _library: library,
            },
        );
        Ok(())
    }

    fn present(&self, package: &str) -> Result<String> {
        self.packages
            .borrow()
            .get(package)
            .map(|loaded| loaded.version.clone())
            .ok_or_else(|| anyhow!("package {} is not present", package))
    }

    #[tracing::instrument(skip(self))]
    fn require(&self, package: &str) -> Result<String> {
        if let Ok(version) = self.present(package) {
            return Ok(version);
        }

        let path = self
            .find_in_auto_path(package)
            .ok_or_else(|| anyhow!("can't find package {}", package))?;
        self.load(&path)?;
        self.present(package)
    }
}

/// Derive `(package, version)` the way Tcl's `load` does: drop a leading
/// `lib`, take the leading letters as the name (first letter upper case,
/// the rest lower case) and the digits and dots that follow as the version.
fn package_identity(file_name: &str) -> Option<(String, String)> {
    let tail = file_name.strip_prefix("lib").unwrap_or(file_name);
    let letters: String = tail.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    if letters.is_empty() {
        return None;
    }

    let mut chars = letters.chars();
    let name = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => return None,
    };

    let version: String = tail[letters.len()..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let version = version.trim_end_matches('.').to_string();

    Some((name, version))
}

/// Reject files that are not shared objects for the host's format and word size.
fn check_native_object(bytes: &[u8]) -> Result<()> {
    let object = goblin::Object::parse(bytes).context("Unrecognized binary format")?;

    match object {
        #[cfg(target_os = "linux")]
        goblin::Object::Elf(elf) => check_elf(elf.header.e_type, elf.header.e_machine, elf.is_64),
        #[cfg(target_os = "macos")]
        goblin::Object::Mach(_) => Ok(()),
        #[cfg(target_os = "windows")]
        goblin::Object::PE(pe) => {
            if pe.is_64 != cfg!(target_pointer_width = "64") {
                bail!("PE word size does not match this process");
            }
            Ok(())
        }
        _ => bail!("Not a native shared library for {}", std::env::consts::OS),
    }
}

#[cfg(target_os = "linux")]
fn check_elf(e_type: u16, e_machine: u16, is_64: bool) -> Result<()> {
    use goblin::elf::header::{ET_DYN, et_to_str};

    if e_type != ET_DYN {
        bail!("ELF type {} is not a shared object", et_to_str(e_type));
    }
    if is_64 != cfg!(target_pointer_width = "64") {
        bail!("ELF word size does not match this process");
    }
    if let Some(expected) = expected_elf_machine() {
        if e_machine != expected {
            bail!(
                "ELF machine {} does not match this process ({})",
                e_machine,
                expected
            );
        }
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn expected_elf_machine() -> Option<u16> {
    use goblin::elf::header::{EM_386, EM_AARCH64, EM_ARM, EM_X86_64};

    if cfg!(target_arch = "x86_64") {
        Some(EM_X86_64)
    } else if cfg!(target_arch = "x86") {
        Some(EM_386)
    } else if cfg!(target_arch = "aarch64") {
        Some(EM_AARCH64)
    } else if cfg!(target_arch = "arm") {
        Some(EM_ARM)
    } else {
        None
    }
}
