use log::warn;
use once_cell::sync::Lazy;
use std::fmt;
use std::path::{Path, PathBuf};

use super::{DefaultPlatformDetector, HostInfo, PlatformDetector};

/// Directory tag for one (OS, architecture, bitness) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformTag {
    LinuxArmv7l,
    LinuxAarch64,
    LinuxX86_64,
    LinuxI686,
    MacosArm64,
    MacosX86_64,
    WinAmd64,
    Win32,
}

static CURRENT: Lazy<PlatformTag> =
    Lazy::new(|| PlatformTag::from_host(&DefaultPlatformDetector.detect()));

impl PlatformTag {
    pub const ALL: [PlatformTag; 8] = [
        PlatformTag::LinuxArmv7l,
        PlatformTag::LinuxAarch64,
        PlatformTag::LinuxX86_64,
        PlatformTag::LinuxI686,
        PlatformTag::MacosArm64,
        PlatformTag::MacosX86_64,
        PlatformTag::WinAmd64,
        PlatformTag::Win32,
    ];

    /// The tag of the running process, computed once.
    pub fn current() -> PlatformTag {
        *CURRENT
    }

    /// Map host facts to a tag. First matching rule wins.
    ///
    /// The mapping is total: any OS that is neither Linux nor macOS is
    /// treated as Windows, even when no such binaries can exist for it.
    pub fn from_host(host: &HostInfo) -> PlatformTag {
        let system = host.system.to_ascii_lowercase();
        let machine = host.machine.as_str();

        match system.as_str() {
            "linux" => {
                if machine.contains("arm") {
                    PlatformTag::LinuxArmv7l
                } else if machine.contains("aarch64") {
                    PlatformTag::LinuxAarch64
                } else if host.is_64bit {
                    PlatformTag::LinuxX86_64
                } else {
                    PlatformTag::LinuxI686
                }
            }
            "darwin" | "macos" => {
                if machine.contains("arm") {
                    PlatformTag::MacosArm64
                } else {
                    PlatformTag::MacosX86_64
                }
            }
            _ => {
                if system != "windows" {
                    warn!(
                        "Unrecognized OS {:?}, falling back to the Windows binary directory",
                        host.system
                    );
                }
                if host.is_64bit {
                    PlatformTag::WinAmd64
                } else {
                    PlatformTag::Win32
                }
            }
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            PlatformTag::LinuxArmv7l => "linux_armv71",
            PlatformTag::LinuxAarch64 => "manylinux2014_aarch64",
            PlatformTag::LinuxX86_64 => "manylinux1_x86_64",
            PlatformTag::LinuxI686 => "manylinux1_i686",
            PlatformTag::MacosArm64 => "macosx_11_0_arm64",
            PlatformTag::MacosX86_64 => "macosx_10_6_x86_64",
            PlatformTag::WinAmd64 => "win_amd64",
            PlatformTag::Win32 => "win32",
        }
    }

    /// Directory holding this platform's binaries under `base`
    pub fn binary_dir(self, base: &Path) -> PathBuf {
        base.join(self.dir_name())
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
