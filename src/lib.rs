//! Grove - browse a folder as a tree, highlight large files and inspect metadata

pub mod diagnostics;
pub mod error;
pub mod metadata;
pub mod navigator;
pub mod output;
pub mod settings;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use diagnostics::{ConsoleDiagnostics, Diagnostics, LogDiagnostics};
pub use error::{ConfigError, ScanError};
pub use metadata::{Entry, FileEntry, FolderEntry};
pub use navigator::Navigator;
pub use output::{EntryTable, HighlightClass, TreeFormatter, format_entries, write_json};
pub use settings::{HighlightConfig, SettingKey, Thresholds};
pub use tree::{FolderTree, Scanner};
