//! Platform detection and binary directory resolution
//!
//! This module reads the facts that identify the host (OS, machine
//! architecture, pointer width) and maps them to the directory that holds
//! the Tkhtml binaries built for it.

mod host;
mod tag;

pub use host::{DefaultPlatformDetector, HostInfo, PlatformDetector};
pub use tag::PlatformTag;

#[cfg(test)]
pub use host::MockPlatformDetector;
