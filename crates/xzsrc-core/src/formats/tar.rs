//! Tar archive format handler.
//!
//! Reads plain, gzip and xz tar streams. Pax and GNU long-name records are
//! bookkeeping for the following header, not members, and are never counted
//! or surfaced.

use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use tar::EntryType;

use super::detect::ArchiveType;
use super::detect::resolve_format;
use super::detect::sniff_format;
use super::traits::ArchiveFormat;
use crate::ExtractionError;
use crate::Result;
use crate::types::ArchiveMember;
use crate::types::MemberKind;

enum Source {
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Tar archive handler.
///
/// The archive is reopened for every pass, so a handler backed by a file
/// never holds a descriptor between [`members`](ArchiveFormat::members) and
/// [`replay`](ArchiveFormat::replay).
pub struct TarArchive {
    source: Source,
    archive_type: ArchiveType,
    label: PathBuf,
}

impl TarArchive {
    /// Opens a tar archive on disk, detecting its compression.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::ArchiveOpen`] if the file cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let archive_type = resolve_format(path).map_err(|source| ExtractionError::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            source: Source::File(path.to_path_buf()),
            archive_type,
            label: path.to_path_buf(),
        })
    }

    /// Wraps an archive held in memory.
    #[must_use]
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let archive_type = sniff_format(&data).unwrap_or(ArchiveType::Tar);
        Self {
            source: Source::Memory(data),
            archive_type,
            label: PathBuf::from("<memory>"),
        }
    }

    /// Detected archive type.
    #[must_use]
    pub const fn archive_type(&self) -> ArchiveType {
        self.archive_type
    }

    fn open_stream(&self) -> Result<tar::Archive<Box<dyn Read + '_>>> {
        let raw: Box<dyn Read + '_> = match &self.source {
            Source::File(path) => Box::new(BufReader::new(
                File::open(path).map_err(|e| self.open_error(e))?,
            )),
            Source::Memory(data) => Box::new(Cursor::new(data.as_slice())),
        };

        let stream = match self.archive_type.codec() {
            Some(codec) => codec.decoder(raw),
            None => raw,
        };
        Ok(tar::Archive::new(stream))
    }

    fn open_error(&self, source: std::io::Error) -> ExtractionError {
        ExtractionError::ArchiveOpen {
            path: self.label.clone(),
            source,
        }
    }
}

impl ArchiveFormat for TarArchive {
    fn members(&mut self) -> Result<Vec<ArchiveMember>> {
        let mut archive = self.open_stream()?;
        let mut members = Vec::new();

        for entry in archive.entries().map_err(|e| self.open_error(e))? {
            let entry = entry.map_err(|e| self.open_error(e))?;
            let header = entry.header();
            let Some(kind) = member_kind(header.entry_type()) else {
                continue;
            };

            let path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            let kind = if kind == MemberKind::File && path.ends_with('/') {
                MemberKind::Directory
            } else {
                kind
            };
            let link_target = entry
                .link_name_bytes()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());

            members.push(ArchiveMember {
                path,
                kind,
                link_target,
                size: entry.size(),
                mode: header.mode().ok(),
            });
        }

        Ok(members)
    }

    fn replay(&mut self, visit: &mut dyn FnMut(usize, &mut dyn Read)) -> Result<()> {
        let mut archive = self.open_stream()?;
        let mut index = 0;

        for entry in archive.entries().map_err(|e| self.open_error(e))? {
            let mut entry = entry.map_err(|e| self.open_error(e))?;
            if member_kind(entry.header().entry_type()).is_none() {
                continue;
            }
            visit(index, &mut entry);
            index += 1;
        }

        Ok(())
    }

    fn format_name(&self) -> &str {
        self.archive_type.name()
    }
}

/// Maps a tar entry type to a member kind, or `None` for metadata records.
fn member_kind(entry_type: EntryType) -> Option<MemberKind> {
    match entry_type {
        EntryType::XGlobalHeader
        | EntryType::XHeader
        | EntryType::GNULongName
        | EntryType::GNULongLink => None,
        EntryType::Regular | EntryType::Continuous => Some(MemberKind::File),
        EntryType::Directory => Some(MemberKind::Directory),
        EntryType::Symlink => Some(MemberKind::Symlink),
        EntryType::Link => Some(MemberKind::Hardlink),
        _ => Some(MemberKind::Other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::gzip;
    use crate::test_utils::xz;

    fn sample() -> Vec<u8> {
        TarTestBuilder::new()
            .add_pax_global_header("a1b2c3d4")
            .add_directory("tukaani-project-xz-a1b2c3d/")
            .add_file("tukaani-project-xz-a1b2c3d/README", b"XZ Utils")
            .add_symlink("tukaani-project-xz-a1b2c3d/COPYING.link", "COPYING")
            .add_hardlink(
                "tukaani-project-xz-a1b2c3d/README.copy",
                "tukaani-project-xz-a1b2c3d/README",
            )
            .build()
    }

    #[test]
    fn test_members_skip_pax_global_header() {
        let mut archive = TarArchive::from_bytes(sample());
        let members = archive.members().unwrap();

        let kinds: Vec<MemberKind> = members.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MemberKind::Directory,
                MemberKind::File,
                MemberKind::Symlink,
                MemberKind::Hardlink,
            ]
        );
        assert_eq!(members[0].path, "tukaani-project-xz-a1b2c3d/");
        assert_eq!(members[1].size, 8);
        assert_eq!(members[2].link_target.as_deref(), Some("COPYING"));
        assert_eq!(
            members[3].link_target.as_deref(),
            Some("tukaani-project-xz-a1b2c3d/README")
        );
    }

    #[test]
    fn test_replay_indices_match_members() {
        let mut archive = TarArchive::from_bytes(sample());
        let mut seen = Vec::new();
        archive
            .replay(&mut |index, reader| {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).unwrap();
                seen.push((index, buf));
            })
            .unwrap();

        assert_eq!(seen.len(), 4);
        assert_eq!(seen[1], (1, b"XZ Utils".to_vec()));
    }

    #[test]
    fn test_compressed_archives() {
        let mut gz = TarArchive::from_bytes(gzip(&sample()));
        assert_eq!(gz.archive_type(), ArchiveType::TarGz);
        assert_eq!(gz.format_name(), "tar.gz");
        assert_eq!(gz.members().unwrap().len(), 4);

        let mut xz = TarArchive::from_bytes(xz(&sample()));
        assert_eq!(xz.archive_type(), ArchiveType::TarXz);
        assert_eq!(xz.members().unwrap().len(), 4);
    }

    #[test]
    fn test_hostile_names_are_preserved() {
        let data = TarTestBuilder::new()
            .add_directory("proj/")
            .add_raw_file(b"proj/../escape.txt", b"x")
            .add_raw_file(b"/etc/passwd", b"x")
            .build();
        let members = TarArchive::from_bytes(data).members().unwrap();

        assert_eq!(members[1].path, "proj/../escape.txt");
        assert_eq!(members[2].path, "/etc/passwd");
    }

    #[test]
    fn test_open_missing_file() {
        let err = TarArchive::open("/nonexistent/xz.tar.gz")
            .err()
            .expect("missing archive must fail");
        assert!(matches!(err, ExtractionError::ArchiveOpen { .. }));
    }

    #[test]
    fn test_corrupt_gzip_is_archive_open_error() {
        // Valid gzip header followed by a reserved deflate block type.
        let mut data = vec![0x1F, 0x8B, 0x08, 0x00, 0, 0, 0, 0, 0x00, 0xFF];
        data.extend_from_slice(&[0xFF; 32]);
        let err = TarArchive::from_bytes(data).members().unwrap_err();
        assert!(matches!(err, ExtractionError::ArchiveOpen { .. }));
    }

    #[test]
    fn test_empty_input_has_no_members() {
        let members = TarArchive::from_bytes(Vec::new()).members().unwrap();
        assert!(members.is_empty());
    }

    #[test]
    fn test_member_kind_mapping() {
        assert_eq!(member_kind(EntryType::XHeader), None);
        assert_eq!(member_kind(EntryType::Fifo), Some(MemberKind::Other));
        assert_eq!(member_kind(EntryType::Char), Some(MemberKind::Other));
        assert_eq!(member_kind(EntryType::Continuous), Some(MemberKind::File));
    }
}
