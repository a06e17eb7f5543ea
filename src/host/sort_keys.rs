//! Named sort keys available to listings.

use crate::sort::{SortKeyFn, natural_sort_key};
use std::collections::BTreeMap;

/// Name of the host's built-in natural-order key.
pub const NATURAL_SORT_KEY: &str = "natural";

/// Sort key name to key function.
#[derive(Debug, Clone)]
pub struct SortKeyRegistry {
    keys: BTreeMap<String, SortKeyFn>,
}

impl SortKeyRegistry {
    /// A registry holding only the built-in natural key.
    pub fn new() -> Self {
        let mut keys: BTreeMap<String, SortKeyFn> = BTreeMap::new();
        keys.insert(NATURAL_SORT_KEY.to_string(), natural_sort_key);
        Self { keys }
    }

    /// Register a key function, returning the one it replaced, if any.
    pub fn register(&mut self, name: impl Into<String>, key: SortKeyFn) -> Option<SortKeyFn> {
        self.keys.insert(name.into(), key)
    }

    pub fn get(&self, name: &str) -> Option<SortKeyFn> {
        self.keys.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }
}

impl Default for SortKeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
