//! Path-traversal guard for archive members

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Absolute, lexically normalized form of the working directory.
///
/// Member paths are checked against this, so it must be computed once and
/// reused for every member of an archive.
pub(crate) fn absolute_base(dir: &Path) -> std::io::Result<PathBuf> {
    Ok(normalize_path(&std::path::absolute(dir)?))
}

/// Resolve where an archive member would be written under `base`.
///
/// `base` must come from [`absolute_base`]. Absolute member names and names
/// whose normalized form leaves `base` are rejected.
///
/// # Errors
///
/// Returns [`Error::PathTraversalDetected`] if the member escapes `base`.
pub(crate) fn resolve_member_path(entry: &Path, base: &Path) -> Result<PathBuf> {
    let resolved = normalize_path(&base.join(entry));

    if entry.has_root() || !resolved.starts_with(base) {
        return Err(Error::PathTraversalDetected {
            entry: entry.to_path_buf(),
            resolved,
        });
    }

    Ok(resolved)
}

/// Resolve `.` and `..` components without touching the file system.
///
/// `..` at the root stays at the root.
fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir | Component::Prefix(_) => result.push(component.as_os_str()),
            Component::CurDir => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> &'static Path {
        if cfg!(windows) {
            Path::new("C:/work/firmware")
        } else {
            Path::new("/work/firmware")
        }
    }

    #[test]
    fn test_plain_member_resolves_inside() {
        let resolved = resolve_member_path(Path::new("aboot.mbn"), base()).unwrap();
        assert_eq!(resolved, base().join("aboot.mbn"));
    }

    #[test]
    fn test_inner_parent_dir_stays_inside() {
        let resolved = resolve_member_path(Path::new("a/b/../modem.bin"), base()).unwrap();
        assert_eq!(resolved, base().join("a/modem.bin"));
    }

    #[test]
    fn test_dot_prefixed_member_resolves_inside() {
        let resolved = resolve_member_path(Path::new("./tz.mbn"), base()).unwrap();
        assert_eq!(resolved, base().join("tz.mbn"));
    }

    #[test]
    fn test_parent_traversal_rejected() {
        let result = resolve_member_path(Path::new("../../etc/password"), base());
        assert!(matches!(result, Err(Error::PathTraversalDetected { .. })));
    }

    #[test]
    fn test_traversal_past_root_rejected() {
        let result = resolve_member_path(Path::new("../../../../../../../tmp/x"), base());
        assert!(matches!(result, Err(Error::PathTraversalDetected { .. })));
    }

    #[test]
    fn test_sibling_with_shared_prefix_rejected() {
        let result = resolve_member_path(Path::new("../firmware-evil/aboot.mbn"), base());
        assert!(matches!(result, Err(Error::PathTraversalDetected { .. })));
    }

    #[test]
    fn test_absolute_member_rejected() {
        let malicious = if cfg!(windows) { "C:\\etc\\passwd" } else { "/etc/passwd" };
        let result = resolve_member_path(Path::new(malicious), base());
        assert!(matches!(result, Err(Error::PathTraversalDetected { .. })));
    }

    #[test]
    fn test_absolute_member_inside_base_still_rejected() {
        let inside = base().join("aboot.mbn");
        let result = resolve_member_path(&inside, base());
        assert!(matches!(result, Err(Error::PathTraversalDetected { .. })));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("foo//bar/./baz/../qux")), Path::new("foo/bar/qux"));
        assert_eq!(normalize_path(Path::new("/../..")), Path::new("/"));
    }

    #[test]
    fn test_absolute_base_is_absolute() {
        let resolved = absolute_base(Path::new("some/relative/./dir/..")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/relative"));
    }
}
