//! Path traversal validation.
//!
//! All checks here are lexical. Nothing touches the filesystem; symlinks
//! that already exist on disk are handled at write time by
//! [`crate::extraction::write`].

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// The validation rule an archive path failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRejection {
    /// Path is the empty string.
    Empty,
    /// Path starts with `/` or `\`.
    Absolute,
    /// Path contains `..`, or a component starts with `..`.
    ParentReference,
    /// Path contains an empty component (`a//b`).
    EmptyComponent,
    /// Path contains a `.` component.
    CurrentDirComponent,
    /// A component is a drive letter or other foreign absolute marker.
    ForeignAbsolute,
    /// A component contains NUL or a control character other than tab.
    ControlCharacter,
    /// Lexical resolution lands outside the destination.
    EscapesDestination,
    /// Destination root could not be made absolute.
    InvalidDestination,
}

impl std::fmt::Display for PathRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::Empty => "empty path",
            Self::Absolute => "absolute path",
            Self::ParentReference => "parent directory reference",
            Self::EmptyComponent => "empty path component",
            Self::CurrentDirComponent => "current directory component",
            Self::ForeignAbsolute => "drive or device prefix",
            Self::ControlCharacter => "control character in path",
            Self::EscapesDestination => "resolves outside destination",
            Self::InvalidDestination => "destination cannot be resolved",
        };
        f.write_str(msg)
    }
}

/// Returns `true` if `candidate` can be joined onto `dest` without leaving it.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use xzsrc_core::security::is_safe;
///
/// let dest = Path::new("/tmp/out");
/// assert!(is_safe("xz/src/liblzma/api/lzma.h", dest));
/// assert!(!is_safe("xz/../../etc/passwd", dest));
/// assert!(!is_safe("/etc/passwd", dest));
/// ```
#[must_use]
pub fn is_safe(candidate: &str, dest: &Path) -> bool {
    check_path(candidate, dest).is_ok()
}

/// Validates an archive path against a destination root.
///
/// Rules are applied in order and the first failure is reported:
///
/// 1. Empty string
/// 2. Leading `/` or `\`
/// 3. `..` anywhere in the forward-slash form, even inside a file name
///    such as `notes..txt`
/// 4. Empty, `.` or `..`-prefixed components
/// 5. Drive letters, colons, or other rooted components
/// 6. NUL or control characters other than tab
/// 7. Lexical resolution against `dest` must stay inside `dest`
///
/// Trailing slashes are trimmed first, so directory entries like `xz/` are
/// accepted.
///
/// # Errors
///
/// Returns the [`PathRejection`] describing the first rule that failed.
pub fn check_path(candidate: &str, dest: &Path) -> Result<(), PathRejection> {
    if candidate.is_empty() {
        return Err(PathRejection::Empty);
    }

    if candidate.starts_with('/') || candidate.starts_with('\\') {
        return Err(PathRejection::Absolute);
    }

    let normalized = candidate.replace('\\', "/");
    if normalized.contains("..") {
        return Err(PathRejection::ParentReference);
    }

    let trimmed = normalized.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(PathRejection::Empty);
    }

    for component in trimmed.split('/') {
        check_component(component)?;
    }

    let root = std::path::absolute(dest)
        .map(|p| lexical_normalize(&p))
        .map_err(|_| PathRejection::InvalidDestination)?;

    let mut joined = root.clone();
    joined.extend(trimmed.split('/'));
    let resolved = lexical_normalize(&joined);

    if !resolved.starts_with(&root) {
        return Err(PathRejection::EscapesDestination);
    }

    Ok(())
}

fn check_component(component: &str) -> Result<(), PathRejection> {
    match component {
        "" => return Err(PathRejection::EmptyComponent),
        "." => return Err(PathRejection::CurrentDirComponent),
        c if c.starts_with("..") => return Err(PathRejection::ParentReference),
        _ => {}
    }

    let as_path = Path::new(component);
    if component.contains(':') || as_path.has_root() || as_path.is_absolute() {
        return Err(PathRejection::ForeignAbsolute);
    }

    if component
        .chars()
        .any(|c| c == '\0' || (c.is_control() && c != '\t'))
    {
        return Err(PathRejection::ControlCharacter);
    }

    Ok(())
}

/// Resolves `.` and `..` components without consulting the filesystem.
///
/// `..` never climbs above a root or prefix component.
pub(crate) fn lexical_normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::with_capacity(path.components().count());

    for component in path.components() {
        match component {
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            Component::CurDir => {}
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// Joins a relative link target onto the directory that holds the link.
///
/// Both inputs are slash-separated archive paths that already passed
/// [`check_path`]; the result is the archive path the link points at.
pub(crate) fn resolve_link_target(link_path: &str, target: &str) -> String {
    let target = target.trim_end_matches('/');
    match link_path.trim_end_matches('/').rsplit_once('/') {
        Some((parent, _)) => format!("{parent}/{target}"),
        None => target.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dest() -> PathBuf {
        PathBuf::from("/tmp/out")
    }

    #[test]
    fn test_accepts_nested_relative_path() {
        assert!(is_safe("xz/src/a.c", &dest()));
        assert!(is_safe("xz", &dest()));
        assert!(is_safe("xz/", &dest()));
        assert!(is_safe("xz/doc/with\ttab.txt", &dest()));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(check_path("", &dest()), Err(PathRejection::Empty));
    }

    #[test]
    fn test_rejects_absolute_both_separators() {
        assert_eq!(check_path("/etc/passwd", &dest()), Err(PathRejection::Absolute));
        assert_eq!(
            check_path("\\Windows\\System32", &dest()),
            Err(PathRejection::Absolute)
        );
    }

    #[test]
    fn test_rejects_parent_traversal() {
        let paths = ["../etc/passwd", "xz/../../etc/passwd", "xz\\..\\..\\boot.ini"];
        for path in paths {
            assert_eq!(
                check_path(path, &dest()),
                Err(PathRejection::ParentReference),
                "path should be rejected: {path}"
            );
        }
    }

    #[test]
    fn test_rejects_double_dot_substring() {
        // Over-broad on purpose: a benign name containing ".." is refused.
        assert_eq!(
            check_path("xz/notes..txt", &dest()),
            Err(PathRejection::ParentReference)
        );
        assert!(!is_safe("xz/...", &dest()));
    }

    #[test]
    fn test_rejects_empty_and_dot_components() {
        assert_eq!(
            check_path("xz//src", &dest()),
            Err(PathRejection::EmptyComponent)
        );
        assert_eq!(
            check_path("xz/./src", &dest()),
            Err(PathRejection::CurrentDirComponent)
        );
        assert_eq!(
            check_path("./xz", &dest()),
            Err(PathRejection::CurrentDirComponent)
        );
    }

    #[test]
    fn test_rejects_drive_letters() {
        assert_eq!(
            check_path("C:/Windows/win.ini", &dest()),
            Err(PathRejection::ForeignAbsolute)
        );
        assert_eq!(
            check_path("xz/file.txt:stream", &dest()),
            Err(PathRejection::ForeignAbsolute)
        );
        assert_eq!(
            check_path("C:\\Windows", &dest()),
            Err(PathRejection::ForeignAbsolute)
        );
    }

    #[test]
    fn test_rejects_control_characters() {
        assert_eq!(
            check_path("xz/file\0.txt", &dest()),
            Err(PathRejection::ControlCharacter)
        );
        assert_eq!(
            check_path("xz/line\nbreak", &dest()),
            Err(PathRejection::ControlCharacter)
        );
        assert_eq!(
            check_path("xz/esc\u{1b}[31m", &dest()),
            Err(PathRejection::ControlCharacter)
        );
    }

    #[test]
    fn test_resolves_inside_destination() {
        let root = dest();
        let mut joined = root.clone();
        joined.extend("xz/sub/file.txt".split('/'));
        assert_eq!(lexical_normalize(&joined), root.join("xz/sub/file.txt"));
        assert!(is_safe("xz/sub/file.txt", &root));
    }

    #[test]
    fn test_relative_destination_is_absolutized() {
        let temp = TempDir::new().expect("failed to create temp dir");
        assert!(is_safe("xz/a.c", temp.path()));
        assert!(is_safe("xz/a.c", Path::new("relative/dest")));
    }

    #[test]
    fn test_lexical_normalize() {
        assert_eq!(
            lexical_normalize(Path::new("/a/b/../c/./d")),
            PathBuf::from("/a/c/d")
        );
        assert_eq!(lexical_normalize(Path::new("/../..")), PathBuf::from("/"));
    }

    #[test]
    fn test_resolve_link_target() {
        assert_eq!(resolve_link_target("xz/src/link", "a.c"), "xz/src/a.c");
        assert_eq!(resolve_link_target("xz/link", "sub/a.c"), "xz/sub/a.c");
        assert_eq!(resolve_link_target("link", "a.c"), "a.c");
        assert_eq!(resolve_link_target("xz/dirlink/", "sub/"), "xz/sub");
    }
}
