//! Archive format detection.
//!
//! Release tarballs are not reliably named after their compression: the
//! GitHub tarball endpoint serves gzip no matter what the file is called.
//! Magic bytes win; the extension is only a fallback.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::compression::CompressionCodec;

/// Gzip member header.
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// XZ stream header.
const XZ_MAGIC: [u8; 6] = [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];

/// Offset of the `ustar` magic inside a tar header block.
const USTAR_OFFSET: usize = 257;

/// Number of leading bytes needed for [`sniff_format`].
pub const SNIFF_LEN: usize = 512;

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// XZ-compressed tar archive.
    TarXz,
}

impl ArchiveType {
    /// Compression wrapped around the tar stream, if any.
    #[must_use]
    pub const fn codec(self) -> Option<CompressionCodec> {
        match self {
            Self::Tar => None,
            Self::TarGz => Some(CompressionCodec::Gzip),
            Self::TarXz => Some(CompressionCodec::Xz),
        }
    }

    /// Human-readable format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::TarXz => "tar.xz",
        }
    }
}

/// Detects the archive type from a file path's extension.
///
/// Returns `None` if the extension is not recognized.
#[must_use]
pub fn detect_format(path: &Path) -> Option<ArchiveType> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "tar" => Some(ArchiveType::Tar),
        "gz" | "tgz" => Some(ArchiveType::TarGz),
        "xz" | "txz" => Some(ArchiveType::TarXz),
        _ => None,
    }
}

/// Detects the archive type from its leading bytes.
///
/// # Examples
///
/// ```
/// use xzsrc_core::formats::detect::{ArchiveType, sniff_format};
///
/// assert_eq!(sniff_format(&[0x1F, 0x8B, 0x08]), Some(ArchiveType::TarGz));
/// assert_eq!(sniff_format(b"plain text"), None);
/// ```
#[must_use]
pub fn sniff_format(head: &[u8]) -> Option<ArchiveType> {
    if head.starts_with(&GZIP_MAGIC) {
        return Some(ArchiveType::TarGz);
    }
    if head.starts_with(&XZ_MAGIC) {
        return Some(ArchiveType::TarXz);
    }
    if head
        .get(USTAR_OFFSET..USTAR_OFFSET + 5)
        .is_some_and(|magic| magic == b"ustar")
    {
        return Some(ArchiveType::Tar);
    }
    None
}

/// Determines the format of an archive on disk.
///
/// Sniffs the first bytes, falls back to the extension, and finally assumes
/// an uncompressed tar so the tar reader reports what is wrong.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn resolve_format(path: &Path) -> std::io::Result<ArchiveType> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)?;

    Ok(sniff_format(&head)
        .or_else(|| detect_format(path))
        .unwrap_or(ArchiveType::Tar))
}
