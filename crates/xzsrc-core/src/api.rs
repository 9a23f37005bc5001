//! High-level public API for archive extraction.

use std::path::Path;

use crate::ExtractConfig;
use crate::ExtractionReport;
use crate::Result;
use crate::extraction::ExtractionEngine;
use crate::formats::TarArchive;
use crate::plan::PlanOutcome;

/// Extracts an archive to the specified output directory.
///
/// The archive's top-level directory is rewritten to
/// [`ExtractConfig::root_name`], every member is validated before anything is
/// written, and unsafe members are skipped and reported. Compression (none,
/// gzip, xz) is detected from the file content.
///
/// # Arguments
///
/// * `archive_path` - Path to the tarball
/// * `output_dir` - Directory where the tree will be written (created if
///   absent)
/// * `config` - Extraction policy
///
/// # Errors
///
/// Returns an error if:
/// - Archive file cannot be opened or decoded
/// - Archive has no members
/// - Every member was rejected
/// - The output directory cannot be created
///
/// # Examples
///
/// ```no_run
/// use xzsrc_core::ExtractConfig;
/// use xzsrc_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_archive("xz-5.4.0.tar.gz", "deps", &ExtractConfig::default())?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let mut archive = TarArchive::open(archive_path)?;
    ExtractionEngine::new(config.clone()).extract(&mut archive, archive_path, output_dir.as_ref())
}

/// Computes what [`extract_archive`] would write, without writing.
///
/// Validation runs against `output_dir` as if extracting there; the
/// directory is not created.
///
/// # Errors
///
/// Returns an error if the archive cannot be read or has no members. An
/// empty plan is not an error here.
///
/// # Examples
///
/// ```no_run
/// use xzsrc_core::ExtractConfig;
/// use xzsrc_core::inspect_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = inspect_archive("xz-5.4.0.tar.gz", "deps", &ExtractConfig::default())?;
/// for member in outcome.plan.members() {
///     println!("{}", member.path);
/// }
/// # Ok(())
/// # }
/// ```
pub fn inspect_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractConfig,
) -> Result<PlanOutcome> {
    let archive_path = archive_path.as_ref();
    let dest = std::path::absolute(output_dir.as_ref())?;
    let mut archive = TarArchive::open(archive_path)?;
    ExtractionEngine::new(config.clone()).plan(&mut archive, archive_path, &dest)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ExtractionError;
    use crate::test_utils::github_style_tarball;
    use tempfile::TempDir;

    #[test]
    fn test_extract_archive_nonexistent_file() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let result = extract_archive(
            temp.path().join("missing.tar.gz"),
            temp.path().join("out"),
            &ExtractConfig::default(),
        );
        assert!(matches!(result, Err(ExtractionError::ArchiveOpen { .. })));
    }

    #[test]
    fn test_inspect_archive_leaves_dest_absent() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let archive = temp.path().join("xz.tar.gz");
        std::fs::write(&archive, github_style_tarball("tukaani-project-xz-1a2b3c4")).unwrap();

        let out = temp.path().join("out");
        let outcome = inspect_archive(&archive, &out, &ExtractConfig::default()).unwrap();

        assert_eq!(outcome.plan.root_dir(), "tukaani-project-xz-1a2b3c4");
        assert!(outcome.plan.contains("xz/src/liblzma/lzma.h"));
        assert!(!out.exists());
    }
}
