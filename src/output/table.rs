//! Fixed-width tables for file and folder metadata

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::metadata::{Entry, FileEntry, FolderEntry, format_timestamp};
use crate::settings::HighlightConfig;

use super::utils::{format_number, megabytes, shorten_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
struct Column {
    title: &'static str,
    /// Zero means the column is never padded.
    width: usize,
    align: Align,
}

const fn col(title: &'static str, width: usize, align: Align) -> Column {
    Column {
        title,
        width,
        align,
    }
}

const FILE_COLUMNS: &[Column] = &[
    col("File Name", 35, Align::Left),
    col("Extension", 15, Align::Left),
    col("Size (B)", 12, Align::Right),
    col("Size (MB)", 12, Align::Right),
    col("Read-only", 10, Align::Left),
    col("Created", 20, Align::Left),
    col("Last Access", 20, Align::Left),
    col("Last Write", 20, Align::Left),
    col("Attributes", 25, Align::Left),
    col("Absolute Path", 0, Align::Left),
];

const FOLDER_COLUMNS: &[Column] = &[
    col("Folder Name", 35, Align::Left),
    col("Files", 10, Align::Right),
    col("Subfolders", 10, Align::Right),
    col("Size (B)", 16, Align::Right),
    col("Size (MB)", 12, Align::Right),
    col("Created", 20, Align::Left),
    col("Last Access", 20, Align::Left),
    col("Last Write", 20, Align::Left),
    col("Attributes", 25, Align::Left),
    col("Absolute Path", 0, Align::Left),
];

fn pad(text: &str, column: &Column) -> String {
    let width = column.width;
    match column.align {
        _ if width == 0 => text.to_string(),
        Align::Left => format!("{:<width$}", text),
        Align::Right => format!("{:>width$}", text),
    }
}

/// A header, an `=` rule and one row per entry.
///
/// The first cell of every row is the entry name, which `print` colours.
#[derive(Debug, Clone)]
pub struct EntryTable {
    columns: &'static [Column],
    rows: Vec<Vec<String>>,
}

impl EntryTable {
    pub fn files(entries: &[FileEntry], config: &HighlightConfig) -> Self {
        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    e.stem.clone(),
                    e.extension.clone().unwrap_or_else(|| "None".to_string()),
                    e.len.to_string(),
                    format!("{:.2}", megabytes(e.len)),
                    if e.read_only { "Yes" } else { "No" }.to_string(),
                    format_timestamp(e.times.created),
                    format_timestamp(e.times.accessed),
                    format_timestamp(e.times.modified),
                    e.attributes.to_string(),
                    path_cell(&e.path.display().to_string(), config),
                ]
            })
            .collect();
        Self {
            columns: FILE_COLUMNS,
            rows,
        }
    }

    pub fn folders(entries: &[FolderEntry], config: &HighlightConfig) -> Self {
        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    e.name.clone(),
                    e.file_count.to_string(),
                    e.folder_count.to_string(),
                    format_number(e.total_size),
                    format!("{:.2}", megabytes(e.total_size)),
                    format_timestamp(e.times.created),
                    format_timestamp(e.times.accessed),
                    format_timestamp(e.times.modified),
                    e.attributes.to_string(),
                    path_cell(&e.path.display().to_string(), config),
                ]
            })
            .collect();
        Self {
            columns: FOLDER_COLUMNS,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> String {
        self.columns
            .iter()
            .map(|c| pad(c.title, c))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// As wide as the header.
    pub fn rule(&self) -> String {
        "=".repeat(self.header().chars().count())
    }

    fn row_cells(&self, row: &[String]) -> Vec<String> {
        row.iter()
            .zip(self.columns)
            .map(|(cell, column)| pad(cell, column))
            .collect()
    }

    pub fn format(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.header());
        output.push('\n');
        output.push_str(&self.rule());
        output.push('\n');
        for row in &self.rows {
            output.push_str(&self.row_cells(row).join(" "));
            output.push('\n');
        }
        output
    }

    pub fn print<W: WriteColor>(&self, out: &mut W) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, "{}", self.header())?;
        out.reset()?;
        writeln!(out)?;
        writeln!(out, "{}", self.rule())?;

        for row in &self.rows {
            let cells = self.row_cells(row);
            let Some((name, rest)) = cells.split_first() else {
                continue;
            };
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(out, "{}", name)?;
            out.reset()?;
            writeln!(out, " {}", rest.join(" "))?;
        }
        Ok(())
    }
}

fn path_cell(path: &str, config: &HighlightConfig) -> String {
    if config.shorten_paths {
        shorten_path(path)
    } else {
        path.to_string()
    }
}

/// Split mixed entries into a file table and a folder table.
///
/// Tables with no rows are left out, so an empty slice yields no tables.
pub fn entry_tables(entries: &[Entry], config: &HighlightConfig) -> Vec<EntryTable> {
    let mut files = Vec::new();
    let mut folders = Vec::new();
    for entry in entries {
        match entry {
            Entry::File(f) => files.push(f.clone()),
            Entry::Folder(f) => folders.push(f.clone()),
        }
    }

    let mut tables = Vec::with_capacity(2);
    if !files.is_empty() {
        tables.push(EntryTable::files(&files, config));
    }
    if !folders.is_empty() {
        tables.push(EntryTable::folders(&folders, config));
    }
    tables
}

/// Plain-text rendering of `entries`.
pub fn format_entries(entries: &[Entry], config: &HighlightConfig) -> String {
    entry_tables(entries, config)
        .iter()
        .map(EntryTable::format)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_entries<W: WriteColor>(
    entries: &[Entry],
    config: &HighlightConfig,
    out: &mut W,
) -> io::Result<()> {
    for (i, table) in entry_tables(entries, config).iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        table.print(out)?;
    }
    Ok(())
}
