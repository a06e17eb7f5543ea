//! Storage layer for pinned paths.
//!
//! The backing file is plain UTF-8 text with one absolute path per line and
//! a trailing newline. It is the only source of truth: [`PinStore`] keeps an
//! in-memory [`PinSet`] as a cache and rebuilds it from disk after every
//! mutation, so external edits to the file are picked up on the next pin or
//! unpin.
//!
//! There is no locking. Concurrent writers are last-writer-wins.

pub mod location;

pub use location::{
    CONFIG_FILE_NAME, DATA_DIR_ENV, PIN_FILE_NAME, config_file, data_dir, default_pin_file,
    expand_home,
};

use crate::models::{PinSet, clean_path, normalize_path};
use crate::{Error, Result};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persisted set of pinned paths backed by a single text file.
#[derive(Debug)]
pub struct PinStore {
    /// Location of the backing file
    path: PathBuf,
    /// Cached contents of the backing file
    pins: PinSet,
}

impl PinStore {
    /// Open the store at `path`, creating an empty backing file if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let pins = load_pin_set(&path)?;
        Ok(Self { path, pins })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current in-memory pin set.
    pub fn pins(&self) -> &PinSet {
        &self.pins
    }

    /// Rebuild the in-memory pin set from the backing file.
    pub fn reload(&mut self) -> Result<&PinSet> {
        self.pins = load_pin_set(&self.path)?;
        Ok(&self.pins)
    }

    /// Check whether a path is pinned.
    ///
    /// Relative paths are resolved against the current working directory.
    pub fn is_pinned(&self, path: &Path) -> bool {
        if path.is_absolute() {
            return self.pins.contains(path);
        }
        match std::env::current_dir() {
            Ok(cwd) => self.pins.contains(&normalize_path(path, &cwd)),
            Err(_) => false,
        }
    }

    /// Pin the given paths.
    ///
    /// Paths already in the backing file are skipped and repeated input
    /// paths are written once. Returns the paths that were appended, in
    /// input order.
    pub fn pin<I, P>(&mut self, paths: I) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let requested = resolve_input(paths)?;
        let contents = read_backing_file(&self.path)?;
        let on_disk: HashSet<PathBuf> = parse_lines(&contents)
            .map(|line| clean_path(Path::new(line)))
            .collect();

        let additions: Vec<PathBuf> = requested
            .into_iter()
            .filter(|path| !on_disk.contains(path))
            .collect();

        if !additions.is_empty() {
            let mut file = OpenOptions::new().append(true).open(&self.path)?;
            if !contents.is_empty() && !contents.ends_with('\n') {
                file.write_all(b"\n")?;
            }
            for path in &additions {
                writeln!(file, "{}", path.display())?;
            }
            debug!(
                count = additions.len(),
                file = %self.path.display(),
                "Appended pinned paths"
            );
        }

        self.reload()?;
        Ok(additions)
    }

    /// Unpin the given paths.
    ///
    /// Every occurrence of each path is removed, including duplicates left
    /// by external edits. The backing file is rewritten only when something
    /// was removed. Returns the removed paths in file order, once each.
    pub fn unpin<I, P>(&mut self, paths: I) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let targets: HashSet<PathBuf> = resolve_input(paths)?.into_iter().collect();
        let contents = read_backing_file(&self.path)?;
        let before: Vec<&str> = parse_lines(&contents).collect();

        let mut removed: Vec<PathBuf> = Vec::new();
        let kept: Vec<&str> = before
            .iter()
            .copied()
            .filter(|line| {
                let path = clean_path(Path::new(line));
                if targets.contains(&path) {
                    if !removed.contains(&path) {
                        removed.push(path);
                    }
                    false
                } else {
                    true
                }
            })
            .collect();

        if kept.len() != before.len() {
            fs::write(&self.path, render_lines(&kept))?;
            debug!(
                removed = before.len() - kept.len(),
                file = %self.path.display(),
                "Rewrote pin file"
            );
        }

        self.reload()?;
        Ok(removed)
    }
}

/// Load the pin set from a backing file, creating the file if it is missing.
///
/// Blank lines are skipped. Relative lines cannot be pins and are skipped
/// with a warning. Duplicates collapse to their first occurrence.
pub fn load_pin_set(path: &Path) -> Result<PinSet> {
    let contents = read_backing_file(path)?;
    let mut pins = PinSet::new();

    for line in parse_lines(&contents) {
        let candidate = Path::new(line);
        if !candidate.is_absolute() {
            warn!(line, file = %path.display(), "Skipping relative path in pin file");
            continue;
        }
        pins.insert(candidate);
    }

    debug!(count = pins.len(), file = %path.display(), "Loaded pin set");
    Ok(pins)
}

/// Create an empty backing file (and its parent directories) if absent.
pub fn ensure_backing_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)?;
    debug!(file = %path.display(), "Created empty pin file");
    Ok(())
}

/// Read the raw backing file contents, creating the file first if needed.
fn read_backing_file(path: &Path) -> Result<String> {
    ensure_backing_file(path)?;
    Ok(fs::read_to_string(path)?)
}

/// Non-blank lines of a backing file, without their terminators.
fn parse_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
}

/// Render lines back into backing file format.
fn render_lines(lines: &[&str]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Normalize and deduplicate caller-supplied paths.
///
/// Relative paths are resolved against the current working directory.
/// Paths that cannot be stored in the line format (non-UTF-8 or containing
/// a newline) are rejected.
fn resolve_input<I, P>(paths: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut cwd: Option<PathBuf> = None;
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let text = path
            .to_str()
            .ok_or_else(|| Error::InvalidInput(format!("path is not valid UTF-8: {}", path.display())))?;
        if text.is_empty() {
            return Err(Error::InvalidInput("path must not be empty".to_string()));
        }
        if text.contains('\n') || text.contains('\r') {
            return Err(Error::InvalidInput(format!(
                "path must not contain a line break: {:?}",
                text
            )));
        }

        let normalized = if path.is_absolute() {
            clean_path(path)
        } else {
            if cwd.is_none() {
                cwd = Some(std::env::current_dir()?);
            }
            match &cwd {
                Some(base) => normalize_path(path, base),
                None => clean_path(path),
            }
        };

        if seen.insert(normalized.clone()) {
            resolved.push(normalized);
        }
    }

    Ok(resolved)
}
