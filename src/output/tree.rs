//! Tree formatter
//!
//! `TreeFormatter` walks a `FolderTree` in pre-order and produces one
//! `TreeLine` per folder and file. The same lines back both the plain-text
//! `format` and the coloured `print`.

use std::io::{self, Write};
use std::path::Path;

use termcolor::{Color, ColorSpec, WriteColor};

use crate::metadata::{FileEntry, display_name, format_timestamp};
use crate::settings::HighlightConfig;
use crate::tree::FolderTree;

use super::highlight::HighlightClass;
use super::utils::{child_prefix, connector, megabytes};

const FOLDER_TAG: &str = "(FOLDER)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Root,
    Folder,
    File,
}

/// One rendered row of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLine {
    /// Indentation plus branch glyph; empty for the root.
    pub prefix: String,
    /// The token that gets coloured.
    pub label: String,
    pub kind: LineKind,
    pub highlight: Option<HighlightClass>,
    /// Size and date suffix for files.
    pub details: String,
}

impl TreeLine {
    pub fn text(&self) -> String {
        format!("{}{}{}", self.prefix, self.label, self.details)
    }

    fn color_spec(&self) -> Option<ColorSpec> {
        match self.kind {
            LineKind::Root | LineKind::Folder => {
                let mut spec = ColorSpec::new();
                spec.set_fg(Some(Color::Blue)).set_bold(true);
                Some(spec)
            }
            LineKind::File => self.highlight.map(HighlightClass::color_spec),
        }
    }
}

/// Renders a `FolderTree` with box-drawing branches.
pub struct TreeFormatter<'a> {
    config: &'a HighlightConfig,
}

impl<'a> TreeFormatter<'a> {
    pub fn new(config: &'a HighlightConfig) -> Self {
        Self { config }
    }

    pub fn lines(&self, tree: &FolderTree) -> Vec<TreeLine> {
        let mut lines = Vec::with_capacity(tree.total_files() + tree.total_folders() + 1);
        lines.push(TreeLine {
            prefix: String::new(),
            label: format!("{}{}", tree.name().to_uppercase(), FOLDER_TAG),
            kind: LineKind::Root,
            highlight: None,
            details: String::new(),
        });
        self.push_entries(tree, "", &mut lines);
        lines
    }

    pub fn format(&self, tree: &FolderTree) -> String {
        let mut output = String::new();
        for line in self.lines(tree) {
            output.push_str(&line.text());
            output.push('\n');
        }
        output
    }

    pub fn print<W: WriteColor>(&self, tree: &FolderTree, out: &mut W) -> io::Result<()> {
        for line in self.lines(tree) {
            write!(out, "{}", line.prefix)?;
            match line.color_spec() {
                Some(spec) => {
                    out.set_color(&spec)?;
                    write!(out, "{}", line.label)?;
                    out.reset()?;
                }
                None => write!(out, "{}", line.label)?,
            }
            writeln!(out, "{}", line.details)?;
        }
        Ok(())
    }

    /// Files first, then folders. The last glyph goes to whichever entry
    /// closes the combined list.
    fn push_entries(&self, node: &FolderTree, prefix: &str, lines: &mut Vec<TreeLine>) {
        let total = node.entry_count();

        for (i, file) in node.files().iter().enumerate() {
            let is_last = i + 1 == total;
            lines.push(self.file_line(file, prefix, is_last));
        }

        let offset = node.files().len();
        for (j, child) in node.children().iter().enumerate() {
            let is_last = offset + j + 1 == total;
            lines.push(TreeLine {
                prefix: format!("{}{}", prefix, connector(is_last)),
                label: format!("{}{}", child.name(), FOLDER_TAG),
                kind: LineKind::Folder,
                highlight: None,
                details: String::new(),
            });
            self.push_entries(child, &child_prefix(prefix, is_last), lines);
        }
    }

    fn file_line(&self, path: &Path, prefix: &str, is_last: bool) -> TreeLine {
        let mut line = TreeLine {
            prefix: format!("{}{}", prefix, connector(is_last)),
            label: display_name(path),
            kind: LineKind::File,
            highlight: None,
            details: String::new(),
        };

        let entry = match FileEntry::from_path(path) {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("no metadata for {}: {}", path.display(), e);
                return line;
            }
        };

        if self.config.highlight {
            line.highlight = HighlightClass::classify(entry.len, &self.config.thresholds);
        }
        if self.config.show_size {
            line.details
                .push_str(&format!(" ({} B) ({:.2} MB)", entry.len, megabytes(entry.len)));
        }
        if self.config.show_creation_date {
            line.details.push_str(&format!(
                " ||Created: {}||",
                format_timestamp(entry.times.created)
            ));
        }
        if self.config.show_last_change {
            line.details.push_str(&format!(
                " ||Last change: {}||",
                format_timestamp(entry.times.modified)
            ));
        }
        line
    }
}
