//! Filename conventions for Tkhtml binaries.
//!
//! ```text
//! libTkhtml<major>.<minor>.<ext>      standard release
//! libTkhtml<major>.<minor>exp.<ext>   experimental release
//! ```

/// Substring every candidate filename must contain.
pub const BINARY_MARKER: &str = "libTkhtml";

/// Suffix of the stem (before the extension) marking an experimental build.
pub const EXPERIMENTAL_MARKER: &str = "exp";

/// Is this filename one of the binaries we care about?
pub fn is_candidate(file_name: &str) -> bool {
    file_name.contains(BINARY_MARKER)
}

fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rfind('.') {
        Some(dot) => (&file_name[..dot], Some(&file_name[dot + 1..])),
        None => (file_name, None),
    }
}

/// Experimental binaries carry the marker right before the extension.
pub fn is_experimental(file_name: &str) -> bool {
    split_extension(file_name).0.ends_with(EXPERIMENTAL_MARKER)
}

/// Version encoded in a filename, e.g. `3.1` for `libTkhtml3.1exp.so`.
pub fn version_of(file_name: &str) -> String {
    let stem = split_extension(file_name).0;
    let stem = stem.strip_suffix(EXPERIMENTAL_MARKER).unwrap_or(stem);
    stem.replacen(BINARY_MARKER, "", 1)
}

/// Extension of a filename without the leading dot.
pub fn extension_of(file_name: &str) -> Option<&str> {
    split_extension(file_name).1
}

/// Build a filename from its parts; inverse of the functions above.
pub fn file_name(version: &str, experimental: bool, extension: &str) -> String {
    let marker = if experimental { EXPERIMENTAL_MARKER } else { "" };
    format!("{BINARY_MARKER}{version}{marker}.{extension}")
}

/// File name for the host's native library extension.
pub fn native_file_name(version: &str, experimental: bool) -> String {
    file_name(version, experimental, std::env::consts::DLL_EXTENSION)
}
