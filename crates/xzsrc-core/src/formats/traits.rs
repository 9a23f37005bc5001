//! Common traits for archive format handlers.

use std::io::Read;

use crate::Result;
use crate::types::ArchiveMember;

/// A source of archive members that can be read twice.
///
/// Extraction needs the complete member list before writing anything, and
/// then the member contents in the same order. Implementations enumerate
/// headers with [`members`](Self::members) and stream contents with
/// [`replay`](Self::replay); indices passed to the visitor are positions in
/// the list returned by `members`.
pub trait ArchiveFormat {
    /// Reads the member table without materializing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be opened or parsed.
    fn members(&mut self) -> Result<Vec<ArchiveMember>>;

    /// Streams every member in archive order to `visit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be re-read.
    fn replay(&mut self, visit: &mut dyn FnMut(usize, &mut dyn Read)) -> Result<()>;

    /// Returns the archive format name.
    fn format_name(&self) -> &str;
}
