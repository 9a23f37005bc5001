//! Top-level directory rewriting.

use crate::types::ArchiveMember;

/// Replaces an archive's variable top-level directory with a fixed name.
///
/// Release tarballs wrap everything in a directory whose name encodes a tag
/// or commit (`tukaani-project-xz-1a2b3c4/`); downstream build steps expect a
/// stable name instead.
///
/// # Examples
///
/// ```
/// use xzsrc_core::plan::RootRewriter;
///
/// let rewriter = RootRewriter::new("tukaani-project-xz-1a2b3c4", "xz");
/// assert_eq!(
///     rewriter.rewrite("tukaani-project-xz-1a2b3c4/src/liblzma/common.c"),
///     Some("xz/src/liblzma/common.c".to_string())
/// );
/// assert_eq!(rewriter.rewrite("other/file"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootRewriter {
    root_dir: String,
    replacement: String,
}

impl RootRewriter {
    /// Creates a rewriter for a known root directory.
    #[must_use]
    pub fn new(root_dir: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            replacement: replacement.into(),
        }
    }

    /// Takes the root directory from the first component of the first member.
    ///
    /// Returns `None` for an empty member list.
    #[must_use]
    pub fn from_members(members: &[ArchiveMember], replacement: &str) -> Option<Self> {
        let first = members.first()?;
        let root_dir = first.path.split('/').next().unwrap_or_default();
        Some(Self::new(root_dir, replacement))
    }

    /// The root directory name being replaced.
    #[must_use]
    pub fn root_dir(&self) -> &str {
        &self.root_dir
    }

    /// Rewrites `path` if its first component is the root directory.
    ///
    /// The remainder of the path is kept verbatim, including a trailing
    /// slash. Returns `None` for paths outside the root, and for every path
    /// when the root itself is empty, `.` or `..`.
    #[must_use]
    pub fn rewrite(&self, path: &str) -> Option<String> {
        if matches!(self.root_dir.as_str(), "" | "." | "..") {
            return None;
        }

        let (first, rest) = match path.split_once('/') {
            Some((first, rest)) => (first, Some(rest)),
            None => (path, None),
        };

        if first != self.root_dir {
            return None;
        }

        Some(match rest {
            Some(rest) => format!("{}/{rest}", self.replacement),
            None => self.replacement.clone(),
        })
    }
}
