//! Scanner - walks a directory and builds a `FolderTree`
//!
//! Every operation here absorbs its own errors. A directory that cannot be
//! listed becomes an empty result plus a diagnostic, and its siblings are
//! still visited. The only thing a caller must check up front is that the
//! root exists.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::diagnostics::Diagnostics;
use crate::error::ScanError;
use crate::metadata::{FileEntry, FolderEntry, display_name};

use super::listing::{DirListing, canonical_root, list_dir, resolve_subdir};
use super::node::FolderTree;

/// Sequential directory scanner reporting problems to a diagnostics sink.
pub struct Scanner<D> {
    diagnostics: D,
}

impl<D: Diagnostics> Scanner<D> {
    pub fn new(diagnostics: D) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> D {
        self.diagnostics
    }

    /// Build the tree rooted at `root`. Relative roots are made absolute
    /// first, so every file path in the tree is absolute.
    ///
    /// Never fails: an unreadable root yields an empty node named after it.
    pub fn scan(&mut self, root: &Path) -> FolderTree {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        log::debug!("scanning {}", root.display());
        let canonical = canonical_root(&root);
        let mut ancestors = Vec::new();
        self.scan_dir(&root, canonical, &mut ancestors)
    }

    fn scan_dir(
        &mut self,
        path: &Path,
        canonical: PathBuf,
        ancestors: &mut Vec<PathBuf>,
    ) -> FolderTree {
        let name = display_name(path);
        let Some(listing) = self.list_reporting(path) else {
            return FolderTree::empty(name, path);
        };

        ancestors.push(canonical);
        let mut children = Vec::with_capacity(listing.dirs.len());
        for dir in &listing.dirs {
            let parent = &ancestors[ancestors.len() - 1];
            let child = match resolve_subdir(dir, parent, ancestors) {
                Ok(child_canonical) => self.scan_dir(&dir.path, child_canonical, ancestors),
                Err(e) => {
                    self.diagnostics.emit(e);
                    FolderTree::empty(display_name(&dir.path), &dir.path)
                }
            };
            children.push(child);
        }
        ancestors.pop();

        FolderTree::new(name, path, listing.files, children)
    }

    /// List the files of `path`, optionally through the whole subtree.
    ///
    /// Unreadable paths contribute nothing and are reported. The recursive
    /// order is one depth-first walk, not necessarily the order `scan` uses.
    pub fn list_files(&mut self, path: &Path, recursive: bool) -> Vec<PathBuf> {
        if path.as_os_str().is_empty() {
            self.diagnostics.emit(ScanError::NotFound(path.to_path_buf()));
            return Vec::new();
        }

        if !recursive {
            return self
                .list_reporting(path)
                .map(|listing| listing.files)
                .unwrap_or_default();
        }

        let walker = WalkBuilder::new(path)
            .standard_filters(false)
            .follow_links(true)
            .build();

        let mut files = Vec::new();
        for result in walker {
            match result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|t| t.is_file()) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => self.diagnostics.emit(ScanError::from_walk(path, err)),
            }
        }
        files
    }

    /// Total length of every file under `path`.
    ///
    /// Unlike the other operations, subtrees that cannot be listed add zero
    /// without reaching the diagnostics sink; they are only logged.
    pub fn aggregate_size(&self, path: &Path) -> u64 {
        let mut ancestors = Vec::new();
        size_of_dir(path, canonical_root(path), &mut ancestors)
    }

    /// Stat a single file.
    pub fn describe_file(&self, path: &Path) -> Result<FileEntry, ScanError> {
        FileEntry::from_path(path).map_err(|e| ScanError::from_io(path, e))
    }

    /// Stat a folder, count its direct entries and aggregate its size.
    pub fn describe_folder(&mut self, path: &Path) -> Result<FolderEntry, ScanError> {
        let metadata = fs::metadata(path).map_err(|e| ScanError::from_io(path, e))?;
        let absolute = std::path::absolute(path).map_err(|e| ScanError::from_io(path, e))?;

        let (file_count, folder_count) = match self.list_reporting(path) {
            Some(listing) => (listing.files.len(), listing.dirs.len()),
            None => (0, 0),
        };
        let total_size = self.aggregate_size(path);

        Ok(FolderEntry::from_metadata(
            absolute,
            &metadata,
            file_count,
            folder_count,
            total_size,
        ))
    }

    /// List `path`, sending any failure to the diagnostics sink.
    pub(super) fn list_reporting(&mut self, path: &Path) -> Option<DirListing> {
        match list_dir(path) {
            Ok(mut listing) => {
                for e in listing.errors.drain(..) {
                    self.diagnostics.emit(e);
                }
                Some(listing)
            }
            Err(e) => {
                self.diagnostics.emit(e);
                None
            }
        }
    }

    pub(super) fn report(&mut self, error: ScanError) {
        self.diagnostics.emit(error);
    }
}

fn size_of_dir(path: &Path, canonical: PathBuf, ancestors: &mut Vec<PathBuf>) -> u64 {
    let listing = match list_dir(path) {
        Ok(l) => l,
        Err(e) => {
            log::debug!("aggregate size: counting {} as empty: {}", path.display(), e);
            return 0;
        }
    };

    let mut total: u64 = listing
        .files
        .iter()
        .map(|f| fs::metadata(f).map(|m| m.len()).unwrap_or(0))
        .sum();

    ancestors.push(canonical);
    for dir in &listing.dirs {
        let parent = &ancestors[ancestors.len() - 1];
        match resolve_subdir(dir, parent, ancestors) {
            Ok(child_canonical) => total += size_of_dir(&dir.path, child_canonical, ancestors),
            Err(e) => log::debug!("aggregate size: skipping {}", e),
        }
    }
    ancestors.pop();

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDir;

    fn scanner() -> Scanner<Vec<ScanError>> {
        Scanner::new(Vec::new())
    }

    fn sample_dir() -> TestDir {
        let dir = TestDir::new();
        dir.add_file("top.txt", "top");
        dir.add_file("a/one.txt", "1");
        dir.add_file("a/two.txt", "22");
        dir.add_file("a/deep/three.txt", "333");
        dir.add_dir("empty");
        dir
    }

    #[test]
    fn test_scan_counts_files_and_folders() {
        let dir = sample_dir();
        let mut scanner = scanner();
        let tree = scanner.scan(dir.path());

        assert_eq!(tree.total_files(), 4);
        assert_eq!(tree.total_folders(), 3);
        assert_eq!(tree.files().len(), 1);
        assert!(scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_scan_root_name_and_files_are_absolute() {
        let dir = sample_dir();
        let tree = scanner().scan(&dir.path().join("a"));

        assert_eq!(tree.name(), "a");
        assert!(tree.files().iter().all(|f| f.is_absolute()));
        assert_eq!(tree.children()[0].name(), "deep");
    }

    #[test]
    fn test_scan_keeps_enumeration_order() {
        let dir = TestDir::new();
        for name in ["q", "b", "x", "a"] {
            dir.add_file(&format!("{}.log", name), "");
            dir.add_dir(&format!("dir_{}", name));
        }

        let tree = scanner().scan(dir.path());
        let listing = list_dir(dir.path()).unwrap();
        assert_eq!(tree.files(), listing.files.as_slice());
        let child_paths: Vec<_> = tree.children().iter().map(|c| c.path().to_path_buf()).collect();
        let listed: Vec<_> = listing.dirs.into_iter().map(|d| d.path).collect();
        assert_eq!(child_paths, listed);
    }

    #[test]
    fn test_scan_empty_dir() {
        let dir = TestDir::new();
        let tree = scanner().scan(dir.path());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_scan_missing_root_yields_empty_node() {
        let dir = TestDir::new();
        let mut scanner = scanner();
        let tree = scanner.scan(&dir.path().join("gone"));

        assert_eq!(tree.name(), "gone");
        assert!(tree.is_empty());
        assert!(matches!(
            scanner.diagnostics().as_slice(),
            [ScanError::NotFound(_)]
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_scan_access_denied_subtree_is_contained() {
        use crate::test_utils::LockedDir;

        let dir = TestDir::new();
        dir.add_file("before/a.txt", "a");
        dir.add_file("locked/secret.txt", "s");
        dir.add_file("after/deeper/b.txt", "b");

        let lock = LockedDir::lock(&dir.path().join("locked"));
        if !lock.is_effective() {
            eprintln!("skipped: directory permissions are not enforced for this user");
            return;
        }

        let mut scanner = scanner();
        let tree = scanner.scan(dir.path());

        let locked = tree
            .children()
            .iter()
            .find(|c| c.name() == "locked")
            .expect("locked dir should still be a node");
        assert!(locked.is_empty());
        assert_eq!(tree.total_files(), 2);
        assert_eq!(tree.total_folders(), 4);
        assert!(
            scanner
                .diagnostics()
                .iter()
                .any(|e| matches!(e, ScanError::AccessDenied(_)))
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_scan_symlink_cycle_is_cut() {
        use std::os::unix::fs::symlink;

        let dir = TestDir::new();
        dir.add_file("sub/file.txt", "x");
        symlink("..", dir.path().join("sub").join("parent")).unwrap();

        let mut scanner = scanner();
        let tree = scanner.scan(dir.path());

        let sub = &tree.children()[0];
        let parent = &sub.children()[0];
        assert_eq!(parent.name(), "parent");
        assert!(parent.is_empty());
        assert!(matches!(
            scanner.diagnostics().as_slice(),
            [ScanError::Cycle(_)]
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_scan_failed_child_does_not_stop_siblings() {
        use std::os::unix::fs::symlink;

        let dir = TestDir::new();
        dir.add_file("a_before/one/two/first.txt", "1");
        dir.add_file("z_after/deep/deeper/last.txt", "2");
        symlink(".", dir.path().join("m_loop")).unwrap();

        let mut scanner = scanner();
        let tree = scanner.scan(dir.path());

        let child = |name: &str| {
            tree.children()
                .iter()
                .find(|c| c.name() == name)
                .unwrap_or_else(|| panic!("missing node {}", name))
        };
        assert!(child("m_loop").is_empty());

        let last = &child("z_after").children()[0].children()[0];
        assert_eq!(last.name(), "deeper");
        assert!(last.files()[0].ends_with("last.txt"));
        assert_eq!(child("a_before").total_files(), 1);
        assert_eq!(tree.total_files(), 2);
        assert_eq!(tree.total_folders(), 7);

        assert!(matches!(
            scanner.diagnostics().as_slice(),
            [ScanError::Cycle(p)] if p.ends_with("m_loop")
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_scan_follows_non_cyclic_symlink() {
        use std::os::unix::fs::symlink;

        let dir = TestDir::new();
        dir.add_file("real/inside.txt", "x");
        dir.add_dir("view");
        symlink(dir.path().join("real"), dir.path().join("view").join("alias")).unwrap();

        let tree = scanner().scan(&dir.path().join("view"));
        assert_eq!(tree.total_files(), 1);
    }

    #[test]
    fn test_list_files_flat_and_recursive() {
        let dir = sample_dir();
        let mut scanner = scanner();

        let flat = scanner.list_files(dir.path(), false);
        assert_eq!(flat.len(), 1);
        assert!(flat[0].ends_with("top.txt"));

        let mut all = scanner.list_files(dir.path(), true);
        all.sort();
        let names: Vec<_> = all
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"three.txt".to_string()));
        assert!(scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_list_files_empty_or_missing_path() {
        let dir = TestDir::new();
        let mut scanner = scanner();

        assert!(scanner.list_files(Path::new(""), false).is_empty());
        assert!(scanner.list_files(&dir.path().join("nope"), true).is_empty());
        assert!(scanner.list_files(&dir.path().join("nope"), false).is_empty());
        assert!(scanner.diagnostics().len() >= 3);
    }

    #[test]
    fn test_aggregate_size_matches_recursive_listing() {
        let dir = sample_dir();
        dir.add_sized("a/deep/big.bin", 10_000);
        let mut scanner = scanner();

        let expected: u64 = scanner
            .list_files(dir.path(), true)
            .iter()
            .map(|p| fs::metadata(p).unwrap().len())
            .sum();
        assert_eq!(scanner.aggregate_size(dir.path()), expected);
        assert_eq!(expected, 3 + 1 + 2 + 3 + 10_000);
    }

    #[test]
    fn test_aggregate_size_missing_is_silent_zero() {
        let dir = TestDir::new();
        let scanner = scanner();
        assert_eq!(scanner.aggregate_size(&dir.path().join("nope")), 0);
        assert!(scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_describe_folder() {
        let dir = sample_dir();
        let mut scanner = scanner();
        let entry = scanner.describe_folder(&dir.path().join("a")).unwrap();

        assert_eq!(entry.name, "a");
        assert_eq!(entry.file_count, 2);
        assert_eq!(entry.folder_count, 1);
        assert_eq!(entry.total_size, 6);
        assert!(entry.attributes.directory);
    }

    #[test]
    fn test_describe_missing_file() {
        let dir = TestDir::new();
        let err = scanner().describe_file(&dir.path().join("x.bin")).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }
}
