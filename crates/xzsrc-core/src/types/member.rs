//! Archive member metadata as read from the archive headers.

/// Type of a member in an archive.
///
/// # Examples
///
/// ```
/// use xzsrc_core::types::MemberKind;
///
/// assert_eq!(MemberKind::Symlink.label(), "symlink");
/// assert_eq!(MemberKind::Directory.label(), "dir");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Symbolic link.
    Symlink,

    /// Hard link to an earlier member.
    Hardlink,

    /// Character/block device, FIFO, sparse file or anything else.
    Other,
}

impl MemberKind {
    /// Short lowercase label used in listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "dir",
            Self::Symlink => "symlink",
            Self::Hardlink => "hardlink",
            Self::Other => "other",
        }
    }
}

/// One entry of an archive.
///
/// Every field is untrusted. `path` in particular may be absolute, contain
/// `..`, or point anywhere; it must pass validation before it is used to
/// touch the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Slash-separated path as stored in the archive.
    pub path: String,

    /// Entry type.
    pub kind: MemberKind,

    /// Link target, only present for link kinds.
    pub link_target: Option<String>,

    /// Declared size in bytes (meaningful for regular files).
    pub size: u64,

    /// Permission bits from the header, if readable.
    pub mode: Option<u32>,
}

impl ArchiveMember {
    /// Creates a regular file member.
    #[must_use]
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            kind: MemberKind::File,
            link_target: None,
            size,
            mode: Some(0o644),
        }
    }

    /// Creates a directory member.
    #[must_use]
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: MemberKind::Directory,
            link_target: None,
            size: 0,
            mode: Some(0o755),
        }
    }

    /// Creates a symbolic link member.
    #[must_use]
    pub fn symlink(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: MemberKind::Symlink,
            link_target: Some(target.into()),
            size: 0,
            mode: Some(0o777),
        }
    }

    /// Creates a hard link member.
    #[must_use]
    pub fn hardlink(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: MemberKind::Hardlink,
            link_target: Some(target.into()),
            size: 0,
            mode: Some(0o644),
        }
    }
}
