//! Core extraction engine.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use super::write;
use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::error::SkipReason;
use crate::formats::ArchiveFormat;
use crate::plan::ExtractionPlan;
use crate::plan::PlanOutcome;
use crate::plan::PlannedAction;
use crate::plan::PlannedMember;
use crate::types::DestDir;

/// Validate-then-extract engine.
///
/// Reads the member table, builds an [`ExtractionPlan`], and writes the
/// planned members in archive order. Nothing is written when the plan is
/// empty.
pub struct ExtractionEngine {
    config: ExtractConfig,
}

impl ExtractionEngine {
    /// Creates a new extraction engine with the given configuration.
    #[must_use]
    pub const fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Builds the plan for `archive` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::ArchiveOpen`] if the archive cannot be read
    /// and [`ExtractionError::EmptyArchive`] if it has no members.
    pub fn plan(
        &self,
        archive: &mut dyn ArchiveFormat,
        archive_path: &Path,
        dest: &Path,
    ) -> Result<PlanOutcome> {
        let members = archive.members()?;
        if members.is_empty() {
            return Err(ExtractionError::EmptyArchive {
                path: archive_path.to_path_buf(),
            });
        }
        debug!(
            members = members.len(),
            format = archive.format_name(),
            "read archive member table"
        );

        Ok(ExtractionPlan::build(&members, dest, &self.config))
    }

    /// Extracts the accepted members of `archive` into `output_dir`.
    ///
    /// The destination is created if missing. Members rejected during
    /// planning or failing to write are recorded in the report and logged;
    /// they never abort the pass.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The destination cannot be created
    /// - The archive cannot be read ([`ExtractionError::ArchiveOpen`])
    /// - The archive has no members ([`ExtractionError::EmptyArchive`])
    /// - No member survives validation ([`ExtractionError::NoSafeMembers`])
    pub fn extract(
        &self,
        archive: &mut dyn ArchiveFormat,
        archive_path: &Path,
        output_dir: &Path,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        let dest = DestDir::create(output_dir)?;
        info!(
            archive = %archive_path.display(),
            dest = %dest.as_path().display(),
            "extracting archive"
        );

        let PlanOutcome { plan, skipped } = self.plan(archive, archive_path, dest.as_path())?;
        if plan.is_empty() {
            return Err(ExtractionError::NoSafeMembers {
                rejected: skipped.len(),
            });
        }

        let mut report = ExtractionReport::new();
        report.skipped = skipped;

        let by_index: HashMap<usize, &PlannedMember> =
            plan.members().iter().map(|m| (m.index, m)).collect();
        let mut writer = MemberWriter {
            dest: &dest,
            plan: &plan,
            native_filter: self.config.native_filter,
            report: &mut report,
        };

        archive.replay(&mut |index, reader| {
            if let Some(member) = by_index.get(&index) {
                writer.write(member, reader);
            }
        })?;

        report.duration = start.elapsed();
        info!(
            files = report.files_extracted,
            directories = report.directories_created,
            symlinks = report.symlinks_created,
            hardlinks = report.hardlinks_created,
            bytes = report.bytes_written,
            skipped = report.files_skipped(),
            "extraction complete"
        );

        Ok(report)
    }
}

struct MemberWriter<'a> {
    dest: &'a DestDir,
    plan: &'a ExtractionPlan,
    native_filter: bool,
    report: &'a mut ExtractionReport,
}

impl MemberWriter<'_> {
    fn write(&mut self, member: &PlannedMember, reader: &mut dyn Read) {
        if let Err(reason) = self.try_write(member, reader) {
            warn!(path = %member.original_path, %reason, "skipping archive member");
            self.report.add_skipped(member.original_path.clone(), reason);
        }
    }

    fn try_write(
        &mut self,
        member: &PlannedMember,
        reader: &mut dyn Read,
    ) -> std::result::Result<(), SkipReason> {
        let output_path = self.dest.join(&member.path);
        write::ensure_contained(self.dest, &output_path)?;
        debug!(path = %member.path, "writing member");

        match &member.action {
            PlannedAction::File { mode, .. } => {
                let bytes = write::write_file(reader, &output_path, *mode, self.native_filter)
                    .map_err(write_failed)?;
                self.report.files_extracted += 1;
                self.report.bytes_written = self.report.bytes_written.saturating_add(bytes);
            }
            PlannedAction::Directory => {
                write::create_directory(&output_path).map_err(write_failed)?;
                self.report.directories_created += 1;
            }
            PlannedAction::Symlink { target, resolved } => {
                self.require_planned(resolved)?;
                write::create_symlink(target, &output_path).map_err(write_failed)?;
                self.report.symlinks_created += 1;
            }
            PlannedAction::Hardlink { target } => {
                self.require_planned(target)?;
                let original = self.dest.join(target);
                write::ensure_contained(self.dest, &original)?;
                write::create_hardlink(&original, &output_path).map_err(write_failed)?;
                self.report.hardlinks_created += 1;
            }
        }

        Ok(())
    }

    fn require_planned(&self, target: &str) -> std::result::Result<(), SkipReason> {
        if self.plan.contains(target) {
            Ok(())
        } else {
            Err(SkipReason::LinkTargetNotPlanned {
                target: target.to_string(),
            })
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn write_failed(err: std::io::Error) -> SkipReason {
    SkipReason::WriteFailed(err.to_string())
}
