//! File and folder metadata records
//!
//! These are read on demand when a table or tree line is rendered; the
//! scanned `FolderTree` itself only stores paths.

use std::fmt;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Format used for every timestamp shown to the user.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format an optional timestamp in local time, or `-` when unavailable.
pub fn format_timestamp(time: Option<SystemTime>) -> String {
    match time {
        Some(t) => DateTime::<Local>::from(t).format(TIMESTAMP_FORMAT).to_string(),
        None => "-".to_string(),
    }
}

/// OS attribute flags of a file or folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes {
    pub read_only: bool,
    pub hidden: bool,
    pub system: bool,
    pub directory: bool,
    pub archive: bool,
    pub symlink: bool,
}

impl Attributes {
    fn read(path: &Path, metadata: &Metadata) -> Self {
        let symlink = fs::symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

        let mut attrs = Self {
            read_only: metadata.permissions().readonly(),
            directory: metadata.is_dir(),
            symlink,
            ..Default::default()
        };

        #[cfg(windows)]
        {
            use std::os::windows::fs::MetadataExt;
            const HIDDEN: u32 = 0x2;
            const SYSTEM: u32 = 0x4;
            const ARCHIVE: u32 = 0x20;
            let bits = metadata.file_attributes();
            attrs.hidden = bits & HIDDEN != 0;
            attrs.system = bits & SYSTEM != 0;
            attrs.archive = bits & ARCHIVE != 0;
        }
        #[cfg(not(windows))]
        {
            attrs.hidden = path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'));
        }

        attrs
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.read_only, "ReadOnly"),
            (self.hidden, "Hidden"),
            (self.system, "System"),
            (self.directory, "Directory"),
            (self.archive, "Archive"),
            (self.symlink, "Symlink"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect();

        if set.is_empty() {
            write!(f, "Normal")
        } else {
            write!(f, "{}", set.join(", "))
        }
    }
}

/// Creation, last-access and last-write times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamps {
    pub created: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

impl Timestamps {
    fn read(metadata: &Metadata) -> Self {
        Self {
            created: metadata.created().ok(),
            accessed: metadata.accessed().ok(),
            modified: metadata.modified().ok(),
        }
    }
}

/// Metadata of a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    /// File name without its extension; empty for dotfiles like `.env`.
    pub stem: String,
    /// Text from the last dot on, if any.
    pub extension: Option<String>,
    pub len: u64,
    pub read_only: bool,
    pub times: Timestamps,
    pub attributes: Attributes,
    pub path: PathBuf,
}

impl FileEntry {
    /// Stat `path` and build its record.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let path = std::path::absolute(path)?;
        Ok(Self::from_metadata(path, &metadata))
    }

    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        let name = display_name(&path);
        let (stem, extension) = split_extension(&name);
        let attributes = Attributes::read(&path, metadata);

        Self {
            name,
            stem,
            extension,
            len: metadata.len(),
            read_only: attributes.read_only,
            times: Timestamps::read(metadata),
            attributes,
            path,
        }
    }
}

/// Split a file name at its last dot.
///
/// A leading dot counts, so `.env` has an empty stem and the extension
/// `.env`. A trailing dot gives no extension.
fn split_extension(name: &str) -> (String, Option<String>) {
    match name.rfind('.') {
        Some(i) if i + 1 < name.len() => (name[..i].to_string(), Some(name[i..].to_string())),
        Some(i) => (name[..i].to_string(), None),
        None => (name.to_string(), None),
    }
}

/// Metadata of a folder, including counts and its recursive size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub name: String,
    /// Files directly inside the folder.
    pub file_count: usize,
    /// Subfolders directly inside the folder.
    pub folder_count: usize,
    /// Sum of every file length in the subtree.
    pub total_size: u64,
    pub times: Timestamps,
    pub attributes: Attributes,
    pub path: PathBuf,
}

impl FolderEntry {
    pub fn from_metadata(
        path: PathBuf,
        metadata: &Metadata,
        file_count: usize,
        folder_count: usize,
        total_size: u64,
    ) -> Self {
        Self {
            name: display_name(&path),
            file_count,
            folder_count,
            total_size,
            times: Timestamps::read(metadata),
            attributes: Attributes::read(&path, metadata),
            path,
        }
    }
}

/// A row for the entry tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File(FileEntry),
    Folder(FolderEntry),
}

/// Base name of a path, falling back to the whole path for roots like `/`.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
