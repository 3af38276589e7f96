//! Single-directory listing shared by scan, search and size aggregation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScanError;

/// A subdirectory found while listing, and whether it was reached through a
/// symlink.
#[derive(Debug, Clone)]
pub(crate) struct SubDir {
    pub path: PathBuf,
    pub is_symlink: bool,
}

/// Direct contents of one directory in OS enumeration order.
#[derive(Debug, Default)]
pub(crate) struct DirListing {
    pub files: Vec<PathBuf>,
    pub dirs: Vec<SubDir>,
    /// Entries that could not be read; the rest of the listing is intact.
    pub errors: Vec<ScanError>,
}

/// List `path` once, splitting entries into files and directories.
///
/// Symlinks are classified by their target. Dangling links and special
/// files (sockets, fifos) are neither and are left out.
pub(crate) fn list_dir(path: &Path) -> Result<DirListing, ScanError> {
    let entries = fs::read_dir(path).map_err(|e| ScanError::from_io(path, e))?;
    let mut listing = DirListing::default();

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                listing.errors.push(ScanError::from_io(path, e));
                continue;
            }
        };
        let entry_path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                listing.errors.push(ScanError::from_io(&entry_path, e));
                continue;
            }
        };

        if file_type.is_symlink() {
            match fs::metadata(&entry_path) {
                Ok(meta) if meta.is_dir() => listing.dirs.push(SubDir {
                    path: entry_path,
                    is_symlink: true,
                }),
                Ok(meta) if meta.is_file() => listing.files.push(entry_path),
                _ => {}
            }
        } else if file_type.is_dir() {
            listing.dirs.push(SubDir {
                path: entry_path,
                is_symlink: false,
            });
        } else if file_type.is_file() {
            listing.files.push(entry_path);
        }
    }

    Ok(listing)
}

/// Canonical path of the directory a walk is about to enter.
///
/// `ancestors` holds the canonical paths of every directory on the current
/// branch, parent included. Entering one of them again is a cycle.
pub(crate) fn resolve_subdir(
    dir: &SubDir,
    parent_canonical: &Path,
    ancestors: &[PathBuf],
) -> Result<PathBuf, ScanError> {
    let canonical = if dir.is_symlink {
        fs::canonicalize(&dir.path).map_err(|e| ScanError::from_io(&dir.path, e))?
    } else {
        match dir.path.file_name() {
            Some(name) => parent_canonical.join(name),
            None => dir.path.clone(),
        }
    };

    if ancestors.contains(&canonical) {
        return Err(ScanError::Cycle(dir.path.clone()));
    }
    Ok(canonical)
}

/// Best-effort canonical form of a walk root.
pub(crate) fn canonical_root(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Case-insensitive comparison of a path's base name with `name`.
pub(crate) fn name_matches(path: &Path, name: &str) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().to_lowercase() == name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDir;

    #[test]
    fn test_list_dir_splits_files_and_dirs() {
        let dir = TestDir::new();
        dir.add_file("a.txt", "a");
        dir.add_file("b.txt", "b");
        dir.add_dir("sub");

        let listing = list_dir(dir.path()).unwrap();
        let mut names: Vec<_> = listing
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(listing.dirs.len(), 1);
        assert!(!listing.dirs[0].is_symlink);
        assert!(listing.errors.is_empty());
    }

    #[test]
    fn test_list_dir_preserves_read_dir_order() {
        let dir = TestDir::new();
        for name in ["zeta", "alpha", "mid", "beta"] {
            dir.add_file(&format!("{}.txt", name), "");
        }

        let expected: Vec<PathBuf> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        let listing = list_dir(dir.path()).unwrap();
        assert_eq!(listing.files, expected);
    }

    #[test]
    fn test_list_missing_dir() {
        let dir = TestDir::new();
        let err = list_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinks_classified_by_target() {
        use std::os::unix::fs::symlink;

        let dir = TestDir::new();
        let target = dir.add_file("real.txt", "x");
        let real_dir = dir.add_dir("real_dir");
        symlink(&target, dir.path().join("link.txt")).unwrap();
        symlink(&real_dir, dir.path().join("link_dir")).unwrap();
        symlink(dir.path().join("missing"), dir.path().join("dangling")).unwrap();

        let listing = list_dir(dir.path()).unwrap();
        assert_eq!(listing.files.len(), 2);
        assert_eq!(listing.dirs.len(), 2);
        assert_eq!(listing.dirs.iter().filter(|d| d.is_symlink).count(), 1);
    }

    #[test]
    #[cfg(unix)]
    fn test_resolve_subdir_detects_cycle() {
        use std::os::unix::fs::symlink;

        let dir = TestDir::new();
        let sub = dir.add_dir("sub");
        symlink("..", sub.join("up")).unwrap();

        let root = canonical_root(dir.path());
        let sub_canonical = root.join("sub");
        let up = SubDir {
            path: sub.join("up"),
            is_symlink: true,
        };
        let err = resolve_subdir(&up, &sub_canonical, &[root.clone(), sub_canonical.clone()])
            .unwrap_err();
        assert!(matches!(err, ScanError::Cycle(_)));
    }

    #[test]
    fn test_name_matches_ignores_case() {
        assert!(name_matches(Path::new("/x/Docs"), "docs"));
        assert!(name_matches(Path::new("/x/README.md"), "readme.MD"));
        assert!(!name_matches(Path::new("/x/docs2"), "docs"));
    }
}
