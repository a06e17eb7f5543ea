//! Data models for pinmark.
//!
//! This module defines the core data structures:
//! - `Entry` - A single item in a host directory listing
//! - `PinSet` - The ordered, duplicate-free set of pinned paths
//!
//! Path helpers for lexical normalization live in [`path`].

pub mod entry;
pub mod path;
pub mod pin_set;

pub use entry::Entry;
pub use path::{clean_path, normalize_path};
pub use pin_set::PinSet;
