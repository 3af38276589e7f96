//! Error types for scanning and configuration
//!
//! Scan errors never abort a traversal. Every [`ScanError`] raised below the
//! root is handed to a [`Diagnostics`](crate::Diagnostics) sink and the
//! affected subtree is treated as empty.

use std::io;
use std::path::{Path, PathBuf};

/// A problem met while enumerating part of a directory tree.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The path does not exist.
    #[error("directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The process may not enumerate the path.
    #[error("access denied to folder: {}", .0.display())]
    AccessDenied(PathBuf),

    /// Any other I/O failure while listing or stat-ing the path.
    #[error("I/O error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A symlinked directory resolves to one of its own ancestors.
    #[error("symlink cycle, not descending into {}", .0.display())]
    Cycle(PathBuf),
}

impl ScanError {
    /// Classify an I/O error raised for `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::AccessDenied(path),
            _ => Self::Io { path, source },
        }
    }

    /// Convert an error reported by the `ignore` walker.
    pub(crate) fn from_walk(fallback: &Path, err: ignore::Error) -> Self {
        if let Some(child) = loop_child(&err) {
            return Self::Cycle(child.to_path_buf());
        }
        let path = walk_error_path(&err).unwrap_or(fallback).to_path_buf();
        let source = match err.into_io_error() {
            Some(e) => e,
            None => io::Error::other("directory walk failed"),
        };
        Self::from_io(path, source)
    }

    /// The path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::AccessDenied(p) | Self::Cycle(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}

fn walk_error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}

fn loop_child(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => loop_child(err),
        _ => None,
    }
}

/// Errors raised while loading or editing settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value typed into the settings menu does not fit the setting.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}
