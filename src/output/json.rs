//! JSON output formatting

use std::io::{self, Write};

use crate::tree::FolderTree;

/// Write the tree as pretty-printed JSON.
pub fn write_json<W: Write>(tree: &FolderTree, out: &mut W) -> io::Result<()> {
    let json = serde_json::to_string_pretty(tree).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}
