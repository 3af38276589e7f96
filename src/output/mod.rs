//! Rendering of scan results
//!
//! - `tree` - box-drawing tree with size highlighting
//! - `table` - fixed-width metadata tables for files and folders
//! - `highlight` - size thresholds mapped to colours
//! - `frame` - boxed menus for the navigator
//! - `json` - JSON output
//! - `utils` - shared helpers (prefixes, number and path formatting)
//!
//! Every renderer takes a `HighlightConfig` by reference at call time, so a
//! settings change shows up on the next render.

mod frame;
mod highlight;
mod json;
mod table;
mod tree;
mod utils;

pub use frame::Frame;
pub use highlight::HighlightClass;
pub use json::write_json;
pub use table::{EntryTable, entry_tables, format_entries, print_entries};
pub use tree::{LineKind, TreeFormatter, TreeLine};
pub use utils::{MEGABYTE, format_number, megabytes, shorten_path};
