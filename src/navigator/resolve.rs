//! Turning user-typed names into paths
//!
//! A bare name (no separator) is looked up under the current folder with the
//! scanner's search. Anything with a separator is taken as a path, relative
//! to the current folder unless absolute. Every resolver returns a path even
//! when nothing matched; callers check whether it exists.

use std::path::{Component, Path, PathBuf};

use crate::diagnostics::Diagnostics;
use crate::metadata::display_name;
use crate::tree::Scanner;

fn is_bare_name(input: &str) -> bool {
    !input.contains(['/', '\\'])
}

fn is_current(current: &Path, name: &str) -> bool {
    display_name(current).to_lowercase() == name.to_lowercase()
}

/// Lexically resolve `.` and `..` without touching the filesystem.
pub(super) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = out.has_root() && out.parent().is_none();
                if out.file_name().is_some() {
                    out.pop();
                } else if !at_root {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn as_path(current: &Path, input: &str) -> PathBuf {
    let path = Path::new(input);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        normalize(&current.join(path))
    }
}

/// Target of `to NAME`.
pub(super) fn move_target<D: Diagnostics>(
    scanner: &mut Scanner<D>,
    home: &Path,
    current: &Path,
    input: &str,
) -> PathBuf {
    if input.eq_ignore_ascii_case("home") {
        return home.to_path_buf();
    }
    if Path::new(input).is_absolute() || !is_bare_name(input) {
        return as_path(current, input);
    }
    scanner
        .find_folder(current, input)
        .unwrap_or_else(|| current.join(input))
}

/// Folder named by `all file info in NAME`.
pub(super) fn folder_target<D: Diagnostics>(
    scanner: &mut Scanner<D>,
    current: &Path,
    input: &str,
) -> PathBuf {
    if !is_bare_name(input) {
        return as_path(current, input);
    }
    if is_current(current, input) {
        return current.to_path_buf();
    }
    scanner
        .find_folder(current, input)
        .unwrap_or_else(|| current.join(input))
}

/// File or folder named by `info NAME`. Files win over folders.
pub(super) fn info_target<D: Diagnostics>(
    scanner: &mut Scanner<D>,
    current: &Path,
    input: &str,
) -> PathBuf {
    if !is_bare_name(input) {
        return as_path(current, input);
    }
    if is_current(current, input) {
        return current.to_path_buf();
    }
    scanner
        .find_file(current, input)
        .or_else(|| scanner.find_folder(current, input))
        .unwrap_or_else(|| current.join(input))
}
