/// Host facts used to pick a platform directory.
///
/// Names follow `uname` conventions (`Linux`, `Darwin`, `armv7l`, `arm64`)
/// rather than Rust target names, so the tag table can match on them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub system: String,
    pub machine: String,
    pub is_64bit: bool,
}

impl HostInfo {
    pub fn new(system: impl Into<String>, machine: impl Into<String>, is_64bit: bool) -> Self {
        Self {
            system: system.into(),
            machine: machine.into(),
            is_64bit,
        }
    }

    /// Detect the current host from the compilation target
    pub fn detect() -> Self {
        let os = std::env::consts::OS;
        Self {
            system: Self::uname_system(os),
            machine: Self::uname_machine(os, std::env::consts::ARCH),
            is_64bit: cfg!(target_pointer_width = "64"),
        }
    }

    fn uname_system(os: &str) -> String {
        match os {
            "linux" => "Linux".to_string(),
            "macos" => "Darwin".to_string(),
            "windows" => "Windows".to_string(),
            other => other.to_string(),
        }
    }

    fn uname_machine(os: &str, arch: &str) -> String {
        match (os, arch) {
            ("macos", "aarch64") => "arm64".to_string(),
            (_, "arm") => "armv7l".to_string(),
            (_, "x86") => "i686".to_string(),
            (_, other) => other.to_string(),
        }
    }
}

/// Trait for platform detection (useful for testing)
#[cfg_attr(test, mockall::automock)]
pub trait PlatformDetector: Send + Sync {
    fn detect(&self) -> HostInfo;
}

/// Default platform detector using compile-time detection
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPlatformDetector;

impl PlatformDetector for DefaultPlatformDetector {
    fn detect(&self) -> HostInfo {
        HostInfo::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_detect() {
        let host = HostInfo::detect();

        assert!(!host.system.is_empty());
        assert!(!host.machine.is_empty());

        #[cfg(target_os = "macos")]
        assert_eq!(host.system, "Darwin");

        #[cfg(target_os = "linux")]
        assert_eq!(host.system, "Linux");

        #[cfg(target_os = "windows")]
        assert_eq!(host.system, "Windows");

        #[cfg(target_pointer_width = "64")]
        assert!(host.is_64bit);
    }

    #[test]
    fn test_uname_machine_names() {
        assert_eq!(HostInfo::uname_machine("macos", "aarch64"), "arm64");
        assert_eq!(HostInfo::uname_machine("linux", "aarch64"), "aarch64");
        assert_eq!(HostInfo::uname_machine("linux", "arm"), "armv7l");
        assert_eq!(HostInfo::uname_machine("windows", "x86"), "i686");
        assert_eq!(HostInfo::uname_machine("linux", "x86_64"), "x86_64");
    }

    #[test]
    fn test_uname_system_passes_unknown_through() {
        assert_eq!(HostInfo::uname_system("freebsd"), "freebsd");
    }

    #[test]
    fn test_default_platform_detector() {
        let detector = DefaultPlatformDetector;
        assert_eq!(detector.detect(), HostInfo::detect());
    }
}
