//! The in-memory set of pinned paths.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::path::clean_path;

/// Ordered, duplicate-free collection of pinned paths.
///
/// Iteration order is pin order (the order of first appearance in the
/// backing file). Every stored path is absolute and lexically clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinSet {
    paths: Vec<PathBuf>,
    index: HashSet<PathBuf>,
}

impl PinSet {
    /// Create an empty pin set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path at the end of the pin order.
    ///
    /// Returns `false` (and leaves the set unchanged) when the path is
    /// already present or is not absolute.
    pub fn insert(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if !path.is_absolute() {
            return false;
        }
        let path = clean_path(path);
        if self.index.contains(&path) {
            return false;
        }
        self.index.insert(path.clone());
        self.paths.push(path);
        true
    }

    /// Check whether an absolute path is pinned.
    ///
    /// Relative paths are never members.
    pub fn contains(&self, path: &Path) -> bool {
        path.is_absolute() && self.index.contains(&clean_path(path))
    }

    /// Pinned paths in pin order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<P: AsRef<Path>> FromIterator<P> for PinSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut set = PinSet::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}
