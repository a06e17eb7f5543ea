//! Listing entries supplied by the host.

use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// A single entry in a host directory listing.
///
/// The host owns traversal; pinmark only looks at the entry's path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    /// Path of the entry as the host reports it (normally absolute)
    pub path: PathBuf,
}

impl Entry {
    /// Create an entry for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the entry's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The final path component, if the path has one.
    ///
    /// `/` and paths ending in `..` have no basename.
    pub fn basename(&self) -> Option<&OsStr> {
        self.path.file_name()
    }
}

impl From<PathBuf> for Entry {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for Entry {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
