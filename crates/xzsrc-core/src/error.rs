//! Error types for archive extraction operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::security::PathRejection;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that abort an extraction as a whole.
///
/// Problems with individual members never surface here; they are recorded as
/// [`SkipReason`]s in the report and the pass continues.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation on the destination failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is missing, corrupt, or uses an unexpected compression.
    #[error("failed to read archive {path}: {source}")]
    ArchiveOpen {
        /// Path of the archive.
        path: PathBuf,
        /// Underlying reader error.
        #[source]
        source: std::io::Error,
    },

    /// Archive contains no members.
    #[error("archive contains no members: {path}")]
    EmptyArchive {
        /// Path of the archive.
        path: PathBuf,
    },

    /// Every member was rejected during validation.
    #[error("no safe members in archive ({rejected} rejected)")]
    NoSafeMembers {
        /// Number of members that were rejected.
        rejected: usize,
    },
}

impl ExtractionError {
    /// Returns `true` if this error indicates a hostile or malformed archive
    /// rather than an environmental failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use xzsrc_core::ExtractionError;
    ///
    /// let err = ExtractionError::NoSafeMembers { rejected: 3 };
    /// assert!(err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::NoSafeMembers { .. })
    }
}

/// Why a single archive member was not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// First path component differs from the archive's root directory.
    OutsideRoot {
        /// Root directory name taken from the first member.
        root: String,
    },

    /// Devices, FIFOs and other special entries are never extracted.
    UnsupportedKind,

    /// Member path failed validation.
    UnsafePath(PathRejection),

    /// Link target failed validation.
    UnsafeLinkTarget(PathRejection),

    /// Declared file size is above the configured ceiling.
    Oversized {
        /// Declared size in bytes.
        size: u64,
        /// Configured ceiling in bytes.
        max: u64,
    },

    /// Link target is not part of the extraction plan.
    LinkTargetNotPlanned {
        /// Rewritten target path.
        target: String,
    },

    /// Output path would resolve outside the destination on disk.
    EscapesOnDisk,

    /// Filesystem error while writing the member.
    WriteFailed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutsideRoot { root } => write!(f, "outside root directory '{root}'"),
            Self::UnsupportedKind => write!(f, "unsupported entry type"),
            Self::UnsafePath(rule) => write!(f, "unsafe path: {rule}"),
            Self::UnsafeLinkTarget(rule) => write!(f, "unsafe link target: {rule}"),
            Self::Oversized { size, max } => {
                write!(f, "file size {size} exceeds limit {max}")
            }
            Self::LinkTargetNotPlanned { target } => {
                write!(f, "link target '{target}' is not extracted")
            }
            Self::EscapesOnDisk => write!(f, "resolves outside destination on disk"),
            Self::WriteFailed(msg) => write!(f, "extraction error: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_safe_members_display() {
        let err = ExtractionError::NoSafeMembers { rejected: 4 };
        assert_eq!(err.to_string(), "no safe members in archive (4 rejected)");
        assert!(err.is_security_violation());
    }

    #[test]
    fn test_archive_open_keeps_source() {
        use std::error::Error;

        let err = ExtractionError::ArchiveOpen {
            path: PathBuf::from("deps/xz.tar.gz"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "invalid gzip header"),
        };
        assert!(err.to_string().contains("deps/xz.tar.gz"));
        assert!(err.source().is_some());
        assert!(!err.is_security_violation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExtractionError = io_err.into();
        assert!(matches!(err, ExtractionError::Io(_)));
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::Oversized {
            size: 200 * 1024 * 1024,
            max: 100 * 1024 * 1024,
        };
        assert_eq!(reason.to_string(), "file size 209715200 exceeds limit 104857600");

        let reason = SkipReason::UnsafeLinkTarget(PathRejection::ParentReference);
        assert!(reason.to_string().starts_with("unsafe link target"));

        let reason = SkipReason::OutsideRoot {
            root: "proj-abc123".into(),
        };
        assert!(reason.to_string().contains("proj-abc123"));
    }
}
