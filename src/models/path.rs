//! Lexical path normalization.
//!
//! Pinned paths are compared as strings, so every path that enters the pin
//! set goes through [`clean_path`] first. Normalization is purely lexical:
//! symlinks are never resolved and the file system is never touched.

use std::path::{Component, Path, PathBuf};

/// Remove `.` components, resolve `..` against the preceding component and
/// drop trailing separators.
///
/// `..` at the root stays at the root (`/..` becomes `/`). A relative path
/// that climbs above its start keeps the leading `..` components.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    out.pop();
                    depth -= 1;
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(name) => {
                out.push(name);
                depth += 1;
            }
        }
    }

    out
}

/// Make `path` absolute against `base` (when relative) and clean it.
pub fn normalize_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        clean_path(path)
    } else {
        clean_path(&base.join(path))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path_removes_dots() {
        assert_eq!(clean_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
    }

    #[test]
    fn test_clean_path_trailing_separator() {
        assert_eq!(clean_path(Path::new("/home/user/")), PathBuf::from("/home/user"));
    }

    #[test]
    fn test_clean_path_parent_at_root() {
        assert_eq!(clean_path(Path::new("/../etc")), PathBuf::from("/etc"));
        assert_eq!(clean_path(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_clean_path_relative_climb() {
        assert_eq!(clean_path(Path::new("../a/../../b")), PathBuf::from("../../b"));
    }

    #[test]
    fn test_normalize_path_relative() {
        let base = Path::new("/srv/data");
        assert_eq!(
            normalize_path(Path::new("./logs/../cache"), base),
            PathBuf::from("/srv/data/cache")
        );
    }

    #[test]
    fn test_normalize_path_absolute_ignores_base() {
        let base = Path::new("/srv/data");
        assert_eq!(normalize_path(Path::new("/tmp//x"), base), PathBuf::from("/tmp/x"));
    }
}
