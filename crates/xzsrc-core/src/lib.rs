//! Safe extraction of source tarballs with root directory rewriting.
//!
//! `xzsrc-core` extracts a release tarball into a destination directory,
//! replacing the archive's arbitrary top-level directory name (for example
//! `tukaani-project-xz-1a2b3c4/`) with a fixed one (`xz/`). Every member is
//! validated before the first byte is written: absolute paths, `..`
//! traversal, links pointing outside the destination, special files, and
//! (when the native filter is unavailable) oversized files are skipped and
//! reported instead of extracted.
//!
//! # Examples
//!
//! ```no_run
//! use xzsrc_core::ExtractConfig;
//! use xzsrc_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = extract_archive("xz-5.4.0.tar.gz", "deps", &ExtractConfig::default())?;
//! println!(
//!     "Extracted {} files, skipped {}",
//!     report.files_extracted,
//!     report.files_skipped()
//! );
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod plan;
pub mod report;
pub mod security;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::extract_archive;
pub use api::inspect_archive;
pub use config::ExtractConfig;
pub use error::ExtractionError;
pub use error::Result;
pub use error::SkipReason;
pub use plan::ExtractionPlan;
pub use plan::PlanOutcome;
pub use report::ExtractionReport;
pub use report::SkippedMember;

// Re-export types module for easier access
pub use security::is_safe;
pub use types::ArchiveMember;
pub use types::DestDir;
pub use types::MemberKind;
