//! Filesystem writers for planned members.
//!
//! Every writer first confirms that the output location is still inside the
//! destination once symlinks already on disk are resolved, and replaces any
//! non-directory entry at the output path instead of writing through it.

use std::fs::File;
use std::fs::create_dir_all;
use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::error::SkipReason;
use crate::security::sanitize_file_mode;
use crate::types::DestDir;

/// Write buffer size for file content.
const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Mode used when the archive header carries none.
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Confirms that `output_path` will land inside `dest`.
///
/// The nearest existing ancestor of `output_path` is canonicalized, which
/// resolves any symlink already on disk, and compared against the canonical
/// destination.
///
/// # Errors
///
/// Returns [`SkipReason::EscapesOnDisk`] if the resolved ancestor lies
/// outside the destination, or [`SkipReason::WriteFailed`] if it cannot be
/// resolved.
pub fn ensure_contained(dest: &DestDir, output_path: &Path) -> Result<(), SkipReason> {
    let mut ancestor = output_path.parent();
    while let Some(candidate) = ancestor {
        if candidate.exists() {
            break;
        }
        ancestor = candidate.parent();
    }

    let Some(existing) = ancestor else {
        return Err(SkipReason::EscapesOnDisk);
    };
    let resolved = existing
        .canonicalize()
        .map_err(|e| SkipReason::WriteFailed(e.to_string()))?;

    if resolved.starts_with(dest.as_path()) {
        Ok(())
    } else {
        Err(SkipReason::EscapesOnDisk)
    }
}

/// Removes a file or symlink left at `path` by an earlier run.
///
/// Directories are kept; writing a file over one fails later with an I/O
/// error.
pub fn clear_existing(path: &Path) -> io::Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if !meta.is_dir() => std::fs::remove_file(path),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Streams `reader` into a new file at `output_path`.
///
/// Parent directories are created as needed. On Unix the header mode is
/// applied after [`sanitize_file_mode`].
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns an error if directory creation, file creation, the copy or
/// permission setting fails.
pub fn write_file(
    reader: &mut dyn Read,
    output_path: &Path,
    mode: Option<u32>,
    native_filter: bool,
) -> io::Result<u64> {
    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }
    clear_existing(output_path)?;

    let output_file = File::create(output_path)?;
    let mut buffered_writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, output_file);
    let bytes_written = io::copy(reader, &mut buffered_writer)?;
    buffered_writer.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = sanitize_file_mode(mode.unwrap_or(DEFAULT_FILE_MODE), native_filter);
        std::fs::set_permissions(output_path, std::fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = (mode, native_filter);

    Ok(bytes_written)
}

/// Creates a directory, replacing a file or symlink found in its place.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn create_directory(output_path: &Path) -> io::Result<()> {
    clear_existing(output_path)?;
    create_dir_all(output_path)
}

/// Creates a symbolic link at `link_path` whose text is `target`.
///
/// # Errors
///
/// Returns an error if parent creation or link creation fails, or
/// [`io::ErrorKind::Unsupported`] on platforms without symlinks.
#[allow(unused_variables)]
pub fn create_symlink(target: &str, link_path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        if let Some(parent) = link_path.parent() {
            create_dir_all(parent)?;
        }
        clear_existing(link_path)?;
        std::os::unix::fs::symlink(target, link_path)
    }

    #[cfg(not(unix))]
    {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "symlinks are not supported on this platform",
        ))
    }
}

/// Creates a hard link at `link_path` to the already written `original`.
///
/// # Errors
///
/// Returns an error if `original` does not exist yet or link creation fails.
pub fn create_hardlink(original: &Path, link_path: &Path) -> io::Result<()> {
    if let Some(parent) = link_path.parent() {
        create_dir_all(parent)?;
    }
    clear_existing(link_path)?;
    std::fs::hard_link(original, link_path)
}
