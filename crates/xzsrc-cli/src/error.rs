//! Error conversion utilities for CLI.
//!
//! Converts xzsrc-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use xzsrc_core::ExtractionError;

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::ArchiveOpen { path, source } => {
            anyhow!(
                "Failed to read archive '{}': {source}\n\
                 HINT: Check that the file exists and is a .tar, .tar.gz or .tar.xz archive.",
                path.display()
            )
        }
        ExtractionError::EmptyArchive { .. } => {
            anyhow!(
                "Archive '{}' contains no members\n\
                 HINT: The download may have been truncated. Fetch the tarball again.",
                archive.display()
            )
        }
        ExtractionError::NoSafeMembers { rejected } => {
            anyhow!(
                "Security violation: all {rejected} members of '{}' were rejected\n\
                 HINT: This archive may be malicious. Run `xzsrc inspect` to see why each \
                 member was rejected.",
                archive.display()
            )
        }
        ExtractionError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}
