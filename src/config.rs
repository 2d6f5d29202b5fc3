use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use crate::platform::{PlatformDetector, PlatformTag};
use crate::runtime::Runtime;

/// Environment variable overriding the binary root directory.
pub const ROOT_ENV_VAR: &str = "TKHTML_ROOT";

/// Directory name, next to the executable, holding the per-platform folders.
pub const DEFAULT_ROOT_DIR_NAME: &str = "tkhtml";

/// Where to look for binaries and for which platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory containing one sub-directory per platform tag.
    pub root: PathBuf,
    pub platform: PlatformTag,
}

impl Config {
    /// Configuration for the running process, using the cached platform tag.
    pub fn new<R: Runtime + ?Sized>(runtime: &R, root: Option<PathBuf>) -> Result<Self> {
        Self::with_platform(runtime, PlatformTag::current(), root)
    }

    /// Like [`Config::new`], but asks `detector` for the host instead.
    pub fn with_detector<R, D>(runtime: &R, detector: &D, root: Option<PathBuf>) -> Result<Self>
    where
        R: Runtime + ?Sized,
        D: PlatformDetector + ?Sized,
    {
        let host = detector.detect();
        let platform = PlatformTag::from_host(&host);
        debug!("Host {:?} resolved to platform {}", host, platform);
        Self::with_platform(runtime, platform, root)
    }

    fn with_platform<R: Runtime + ?Sized>(
        runtime: &R,
        platform: PlatformTag,
        root: Option<PathBuf>,
    ) -> Result<Self> {
        let root = match root {
            Some(path) => path,
            None => default_root(runtime)?,
        };
        info!("Using Tkhtml root: {}", root.display());

        Ok(Self { root, platform })
    }

    /// `<root>/<platform tag>`
    pub fn binary_dir(&self) -> PathBuf {
        self.platform.binary_dir(&self.root)
    }
}

/// `$TKHTML_ROOT` if set, otherwise `tkhtml/` next to the running executable.
pub fn default_root<R: Runtime + ?Sized>(runtime: &R) -> Result<PathBuf> {
    if let Ok(root) = runtime.env_var(ROOT_ENV_VAR) {
        if !root.is_empty() {
            return Ok(PathBuf::from(root));
        }
    }

    let exe = runtime.current_exe()?;
    let exe_dir = exe
        .parent()
        .with_context(|| format!("Executable {} has no parent directory", exe.display()))?;
    Ok(exe_dir.join(DEFAULT_ROOT_DIR_NAME))
}
