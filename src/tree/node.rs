//! In-memory representation of a scanned directory

use std::path::{Path, PathBuf};

use serde::Serialize;

/// One scanned directory: its direct files and the subdirectories that
/// could be entered.
///
/// `files` and `children` keep the order the OS listed them in; nothing is
/// sorted. A directory that could not be listed is still a node, just an
/// empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderTree {
    name: String,
    path: PathBuf,
    files: Vec<PathBuf>,
    children: Vec<FolderTree>,
}

impl FolderTree {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        files: Vec<PathBuf>,
        children: Vec<FolderTree>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            files,
            children,
        }
    }

    /// A node with no files and no children.
    pub fn empty(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(name, path, Vec::new(), Vec::new())
    }

    /// Base name of the directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path the directory was scanned from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Files directly inside this directory.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn children(&self) -> &[FolderTree] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.children.is_empty()
    }

    /// Files plus subfolders at this level.
    pub fn entry_count(&self) -> usize {
        self.files.len() + self.children.len()
    }

    /// Number of files in the whole subtree.
    pub fn total_files(&self) -> usize {
        self.files.len() + self.children.iter().map(|c| c.total_files()).sum::<usize>()
    }

    /// Number of folder nodes in the subtree, not counting this one.
    pub fn total_folders(&self) -> usize {
        self.children.len() + self.children.iter().map(|c| c.total_folders()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FolderTree {
        FolderTree::new(
            "root",
            "/r",
            vec![PathBuf::from("/r/c.txt")],
            vec![
                FolderTree::new("a", "/r/a", vec![PathBuf::from("/r/a/b.txt")], vec![]),
                FolderTree::new(
                    "d",
                    "/r/d",
                    vec![],
                    vec![FolderTree::empty("e", "/r/d/e")],
                ),
            ],
        )
    }

    #[test]
    fn test_counts() {
        let tree = sample();
        assert_eq!(tree.total_files(), 2);
        assert_eq!(tree.total_folders(), 3);
        assert_eq!(tree.entry_count(), 3);
    }

    #[test]
    fn test_empty_node() {
        let node = FolderTree::empty("x", "/x");
        assert!(node.is_empty());
        assert_eq!(node.total_files(), 0);
        assert_eq!(node.total_folders(), 0);
        assert_eq!(node.name(), "x");
    }

    #[test]
    fn test_serializes_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["name"], "root");
        assert_eq!(json["children"][1]["children"][0]["name"], "e");
        assert_eq!(json["files"][0], "/r/c.txt");
    }
}
