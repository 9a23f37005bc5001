//! Test utilities for building in-memory tarballs.
//!
//! Besides well-formed members, the builder can emit headers with names the
//! `tar` crate refuses to write (`..` components, absolute paths), which is
//! what hostile archives look like on the wire.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Write;

use tar::EntryType;
use tar::Header;

/// Builder for creating TAR test archives with various entry types.
///
/// # Examples
///
/// ```
/// use xzsrc_core::test_utils::TarTestBuilder;
///
/// let tar_data = TarTestBuilder::new()
///     .add_directory("xz-5.4.0/")
///     .add_file("xz-5.4.0/README", b"XZ Utils")
///     .add_symlink("xz-5.4.0/README.md", "README")
///     .build();
/// ```
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    /// Creates a new TAR test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a pax global header carrying a `comment` record, as the GitHub
    /// tarball endpoint does with the commit id.
    #[must_use]
    pub fn add_pax_global_header(mut self, comment: &str) -> Self {
        let record = pax_record("comment", comment);
        let mut header = raw_header(b"pax_global_header", EntryType::XGlobalHeader, None);
        header.set_size(record.len() as u64);
        header.set_mode(0o666);
        header.set_cksum();
        self.builder.append(&header, record.as_slice()).unwrap();
        self
    }

    /// Adds a regular file to the archive.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a regular file with custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let mut header = Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(mode);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a directory to the archive.
    ///
    /// The name is stored verbatim so a trailing slash survives.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let mut header = raw_header(path.as_bytes(), EntryType::Directory, None);
        header.set_size(0);
        header.set_mode(0o755);
        header.set_cksum();
        self.builder.append(&header, std::io::empty()).unwrap();
        self
    }

    /// Adds a symlink to the archive.
    #[must_use]
    pub fn add_symlink(self, path: &str, target: &str) -> Self {
        self.add_raw_link(path.as_bytes(), target.as_bytes(), EntryType::Symlink)
    }

    /// Adds a hardlink to the archive.
    #[must_use]
    pub fn add_hardlink(self, path: &str, target: &str) -> Self {
        self.add_raw_link(path.as_bytes(), target.as_bytes(), EntryType::Link)
    }

    /// Adds a FIFO, which is never extracted.
    #[must_use]
    pub fn add_fifo(mut self, path: &str) -> Self {
        let mut header = raw_header(path.as_bytes(), EntryType::Fifo, None);
        header.set_size(0);
        header.set_mode(0o644);
        header.set_cksum();
        self.builder.append(&header, std::io::empty()).unwrap();
        self
    }

    /// Adds a regular file whose name is written byte for byte.
    ///
    /// `name` must fit the 100-byte header field.
    #[must_use]
    pub fn add_raw_file(mut self, name: &[u8], data: &[u8]) -> Self {
        let mut header = raw_header(name, EntryType::Regular, None);
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        self.builder.append(&header, data).unwrap();
        self
    }

    /// Adds a symlink or hardlink whose name and target are written byte for
    /// byte.
    #[must_use]
    pub fn add_raw_link(mut self, name: &[u8], target: &[u8], entry_type: EntryType) -> Self {
        let mut header = raw_header(name, entry_type, Some(target));
        header.set_size(0);
        header.set_mode(if entry_type == EntryType::Symlink {
            0o777
        } else {
            0o644
        });
        header.set_cksum();
        self.builder.append(&header, std::io::empty()).unwrap();
        self
    }

    /// Builds and returns the TAR archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Gzip-compresses `data`.
#[must_use]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Xz-compresses `data`.
#[must_use]
pub fn xz(data: &[u8]) -> Vec<u8> {
    let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Builds a GitHub-style gzip tarball: pax global header, a
/// `<owner>-<repo>-<sha>/` root and a small source tree.
#[must_use]
pub fn github_style_tarball(root: &str) -> Vec<u8> {
    let tar = TarTestBuilder::new()
        .add_pax_global_header("a1b2c3d4e5f60718293a4b5c6d7e8f9012345678")
        .add_directory(&format!("{root}/"))
        .add_file(&format!("{root}/README"), b"XZ Utils\n")
        .add_directory(&format!("{root}/src/"))
        .add_directory(&format!("{root}/src/liblzma/"))
        .add_file(&format!("{root}/src/liblzma/lzma.h"), b"#define LZMA_H\n")
        .add_file_with_mode(&format!("{root}/autogen.sh"), b"#!/bin/sh\n", 0o755)
        .add_symlink(&format!("{root}/README.md"), "README")
        .build();
    gzip(&tar)
}

fn raw_header(name: &[u8], entry_type: EntryType, link: Option<&[u8]>) -> Header {
    let mut header = Header::new_gnu();
    {
        let old = header.as_old_mut();
        old.name[..name.len()].copy_from_slice(name);
        if let Some(link) = link {
            old.linkname[..link.len()].copy_from_slice(link);
        }
    }
    header.set_entry_type(entry_type);
    header
}

fn pax_record(key: &str, value: &str) -> Vec<u8> {
    let body = format!(" {key}={value}\n");
    let mut len = body.len();
    // The length prefix counts its own digits.
    while len != body.len() + len.to_string().len() {
        len = body.len() + len.to_string().len();
    }
    format!("{len}{body}").into_bytes()
}
