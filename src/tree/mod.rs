//! Directory scanning
//!
//! - `FolderTree`: the scanned shape of one directory subtree
//! - `Scanner`: builds trees, searches by name, lists files and sums sizes
//!
//! Everything runs sequentially on the calling thread. No handle is held
//! open across recursive calls: each directory is listed and drained before
//! its children are visited.

mod listing;
mod node;
mod scanner;
mod search;

pub use node::FolderTree;
pub use scanner::Scanner;
