//! Extraction operation reporting.

use std::time::Duration;

use crate::error::SkipReason;

/// A member that was not written, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMember {
    /// Path as stored in the archive.
    pub path: String,

    /// Reason the member was skipped.
    pub reason: SkipReason,
}

/// Report of an archive extraction operation.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of regular files written.
    pub files_extracted: usize,

    /// Number of directory entries created.
    pub directories_created: usize,

    /// Number of symlinks created.
    pub symlinks_created: usize,

    /// Number of hard links created.
    pub hardlinks_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,

    /// Members skipped during validation or writing, in archive order.
    pub skipped: Vec<SkippedMember>,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skipped member.
    pub fn add_skipped(&mut self, path: impl Into<String>, reason: SkipReason) {
        self.skipped.push(SkippedMember {
            path: path.into(),
            reason,
        });
    }

    /// Returns total number of items written.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted
            + self.directories_created
            + self.symlinks_created
            + self.hardlinks_created
    }

    /// Returns the number of skipped members.
    #[must_use]
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }

    /// Returns whether any member was skipped.
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = ExtractionReport::new();
        assert_eq!(report.files_extracted, 0);
        assert_eq!(report.bytes_written, 0);
        assert!(!report.has_skipped());
    }

    #[test]
    fn test_add_skipped() {
        let mut report = ExtractionReport::new();
        report.add_skipped("proj/../escape.txt", SkipReason::UnsupportedKind);
        assert!(report.has_skipped());
        assert_eq!(report.files_skipped(), 1);
        assert_eq!(report.skipped[0].path, "proj/../escape.txt");
    }

    #[test]
    fn test_total_items() {
        let mut report = ExtractionReport::new();
        report.files_extracted = 10;
        report.directories_created = 5;
        report.symlinks_created = 2;
        report.hardlinks_created = 1;
        assert_eq!(report.total_items(), 18);
    }
}
