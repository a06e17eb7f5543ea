//! Sort keys for host listings.
//!
//! Two keys are provided:
//! - [`natural_sort_key`] - the host's default natural order
//! - [`pin_sort_key`] - natural order with pinned entries first
//!
//! Pinned entries get a [`Segment::Sentinel`] prepended to their natural key.
//! Entries whose name cannot be keyed get the bare sentinel as their key.
//! Since keys compare segment by segment this yields:
//!
//! ```text
//! fallback  <  pinned (natural order)  <  unpinned (natural order)
//! ```

pub mod natural;

pub use natural::{Digits, Segment, natural_key};

use crate::models::{Entry, PinSet};
use tracing::debug;

/// Why an entry's natural key could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SortKeyError {
    #[error("entry has no basename")]
    MissingBasename,

    #[error("entry basename is not valid UTF-8")]
    NonUtf8Basename,
}

/// A comparable listing key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(Vec<Segment>);

impl SortKey {
    /// Key for an unpinned entry.
    pub fn natural(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Key for a pinned entry: the natural key behind a sentinel.
    pub fn pinned(segments: Vec<Segment>) -> Self {
        let mut key = Vec::with_capacity(segments.len() + 1);
        key.push(Segment::Sentinel);
        key.extend(segments);
        Self(key)
    }

    /// Minimal key for entries that could not be keyed.
    pub fn fallback() -> Self {
        Self(vec![Segment::Sentinel])
    }
}

/// Signature of a registrable sort-key function.
pub type SortKeyFn = fn(&Entry, &PinSet) -> SortKey;

/// Compute the natural-order segments of an entry's basename.
pub fn entry_natural_key(entry: &Entry) -> Result<Vec<Segment>, SortKeyError> {
    let name = entry.basename().ok_or(SortKeyError::MissingBasename)?;
    let name = name.to_str().ok_or(SortKeyError::NonUtf8Basename)?;
    Ok(natural_key(name))
}

/// The host's default key: natural order, ignoring pins.
pub fn natural_sort_key(entry: &Entry, _pins: &PinSet) -> SortKey {
    match entry_natural_key(entry) {
        Ok(segments) => SortKey::natural(segments),
        Err(err) => fallback_key(entry, err),
    }
}

/// Natural order with pinned entries ahead of unpinned ones.
///
/// Pin order plays no part: pinned entries are ordered among themselves by
/// name, just like unpinned ones.
pub fn pin_sort_key(entry: &Entry, pins: &PinSet) -> SortKey {
    match entry_natural_key(entry) {
        Ok(segments) if pins.contains(entry.path()) => SortKey::pinned(segments),
        Ok(segments) => SortKey::natural(segments),
        Err(err) => fallback_key(entry, err),
    }
}

fn fallback_key(entry: &Entry, err: SortKeyError) -> SortKey {
    debug!(path = %entry.path().display(), error = %err, "Using fallback sort key");
    SortKey::fallback()
}

/// Stable-sort entries with the given key function.
pub fn sort_entries_by(entries: &mut [Entry], pins: &PinSet, key: SortKeyFn) {
    entries.sort_by_cached_key(|entry| key(entry, pins));
}

/// Stable-sort entries with pinned entries first.
pub fn sort_entries(entries: &mut [Entry], pins: &PinSet) {
    sort_entries_by(entries, pins, pin_sort_key);
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    use std::path::PathBuf;

    fn entries(paths: &[&str]) -> Vec<Entry> {
        paths.iter().map(|p| Entry::new(*p)).collect()
    }

    fn names(entries: &[Entry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.path().display().to_string())
            .collect()
    }

    #[test]
    fn test_pinned_entry_sorts_first() {
        let pins: PinSet = ["/d/z"].into_iter().collect();
        let mut listing = entries(&["/d/b2", "/d/a10", "/d/z", "/d/a9"]);

        sort_entries(&mut listing, &pins);

        assert_eq!(names(&listing), vec!["/d/z", "/d/a9", "/d/a10", "/d/b2"]);
    }

    #[test]
    fn test_pinned_entries_use_natural_order_not_pin_order() {
        let pins: PinSet = ["/d/x10", "/d/x9"].into_iter().collect();
        let mut listing = entries(&["/d/a", "/d/x10", "/d/x9"]);

        sort_entries(&mut listing, &pins);

        assert_eq!(names(&listing), vec!["/d/x9", "/d/x10", "/d/a"]);
    }

    #[test]
    fn test_natural_key_ignores_pins() {
        let pins: PinSet = ["/d/z"].into_iter().collect();
        let mut listing = entries(&["/d/z", "/d/a"]);

        sort_entries_by(&mut listing, &pins, natural_sort_key);

        assert_eq!(names(&listing), vec!["/d/a", "/d/z"]);
    }

    #[test]
    fn test_missing_basename_falls_back() {
        assert_eq!(
            entry_natural_key(&Entry::new("/")),
            Err(SortKeyError::MissingBasename)
        );
        assert_eq!(pin_sort_key(&Entry::new("/"), &PinSet::new()), SortKey::fallback());
    }

    #[test]
    fn test_non_utf8_basename_falls_back() {
        let raw = OsStr::from_bytes(b"/d/\xff\xfe");
        let entry = Entry::new(PathBuf::from(raw));

        assert_eq!(entry_natural_key(&entry), Err(SortKeyError::NonUtf8Basename));
    }

    #[test]
    fn test_fallback_sorts_before_keyed_entries() {
        let pins: PinSet = ["/d/m"].into_iter().collect();
        let mut listing = entries(&["/d/b", "/d/m", "/"]);

        sort_entries(&mut listing, &pins);

        assert_eq!(names(&listing), vec!["/", "/d/m", "/d/b"]);
        assert!(SortKey::fallback() < SortKey::pinned(natural_key("a")));
        assert!(SortKey::fallback() < SortKey::natural(natural_key("0")));
    }

    #[test]
    fn test_pinned_key_beats_any_unpinned_key() {
        let pinned = SortKey::pinned(natural_key("zzz"));
        assert!(pinned < SortKey::natural(natural_key("0")));
        assert!(pinned < SortKey::natural(natural_key("a")));
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut listing = entries(&["/one/Readme", "/two/readme"]);

        sort_entries(&mut listing, &PinSet::new());

        assert_eq!(names(&listing), vec!["/one/Readme", "/two/readme"]);
    }
}
