//! Name-based search for folders and files under a root
//!
//! Both searches are depth-first, but at every level all direct entries are
//! compared before any of them is descended into. A match one level down
//! therefore beats a deeper match anywhere in the same subtree.

use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostics;

use super::listing::{DirListing, canonical_root, name_matches, resolve_subdir};
use super::scanner::Scanner;

#[derive(Debug, Clone, Copy)]
enum Target {
    Folder,
    File,
}

impl Target {
    fn find_here(self, listing: &DirListing, name: &str) -> Option<PathBuf> {
        match self {
            Target::Folder => listing
                .dirs
                .iter()
                .find(|d| name_matches(&d.path, name))
                .map(|d| d.path.clone()),
            Target::File => listing
                .files
                .iter()
                .find(|f| name_matches(f, name))
                .cloned(),
        }
    }
}

impl<D: Diagnostics> Scanner<D> {
    /// First subdirectory under `root` whose name matches `name`, ignoring
    /// case. `root` itself is never a candidate.
    pub fn find_folder(&mut self, root: &Path, name: &str) -> Option<PathBuf> {
        log::debug!("searching {} for folder '{}'", root.display(), name);
        self.search(root, name, Target::Folder)
    }

    /// First file under `root` whose full name matches `name`, ignoring case.
    pub fn find_file(&mut self, root: &Path, name: &str) -> Option<PathBuf> {
        log::debug!("searching {} for file '{}'", root.display(), name);
        self.search(root, name, Target::File)
    }

    fn search(&mut self, root: &Path, name: &str, target: Target) -> Option<PathBuf> {
        let mut ancestors = Vec::new();
        self.search_dir(root, canonical_root(root), name, target, &mut ancestors)
    }

    fn search_dir(
        &mut self,
        dir: &Path,
        canonical: PathBuf,
        name: &str,
        target: Target,
        ancestors: &mut Vec<PathBuf>,
    ) -> Option<PathBuf> {
        let listing = self.list_reporting(dir)?;
        if let Some(hit) = target.find_here(&listing, name) {
            return Some(hit);
        }

        ancestors.push(canonical);
        let mut found = None;
        for sub in &listing.dirs {
            let parent = &ancestors[ancestors.len() - 1];
            match resolve_subdir(sub, parent, ancestors) {
                Ok(child_canonical) => {
                    found = self.search_dir(&sub.path, child_canonical, name, target, ancestors);
                    if found.is_some() {
                        break;
                    }
                }
                Err(e) => self.report(e),
            }
        }
        ancestors.pop();

        found
    }
}
