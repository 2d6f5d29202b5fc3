//! Search-path helpers for `PATH`-style environment variables.

use anyhow::{Context, Result};
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

/// Normalize a path by processing `.` and `..` components lexically.
/// This does not access the filesystem and does not follow symlinks.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push(component);
                }
            }
            _ => result.push(component),
        }
    }
    result
}

/// Check whether `dir` is already one of the entries of a search-path value.
///
/// Entries are compared after lexical normalization, so `/opt/tkhtml/`
/// and `/opt/./tkhtml` both count as `/opt/tkhtml`. Empty entries never match.
pub fn contains_dir(search_path: Option<&OsStr>, dir: &Path) -> bool {
    let Some(search_path) = search_path else {
        return false;
    };
    let wanted = normalize_path(dir);
    env::split_paths(search_path)
        .filter(|entry| !entry.as_os_str().is_empty())
        .any(|entry| normalize_path(&entry) == wanted)
}

/// Build a new search-path value with `dir` in front of the existing entries.
///
/// Fails if `dir` contains the platform's path separator.
pub fn prepend_dir(search_path: Option<&OsStr>, dir: &Path) -> Result<OsString> {
    let existing: Vec<PathBuf> = search_path.map(env::split_paths).into_iter().flatten().collect();
    let entries = std::iter::once(dir.to_path_buf()).chain(existing);
    env::join_paths(entries)
        .with_context(|| format!("Cannot add {} to the search path", dir.display()))
}
