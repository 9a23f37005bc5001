//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use crate::version::ResolvedVersion;
use crate::version::VersionSource;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use xzsrc_core::ExtractionReport;
use xzsrc_core::PlanOutcome;
use xzsrc_core::SkippedMember;

pub struct JsonFormatter;

#[derive(Serialize)]
struct SkippedOutput {
    path: String,
    reason: String,
}

impl From<&SkippedMember> for SkippedOutput {
    fn from(skipped: &SkippedMember) -> Self {
        Self {
            path: skipped.path.clone(),
            reason: skipped.reason.to_string(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput {
            files_extracted: usize,
            directories_created: usize,
            symlinks_created: usize,
            hardlinks_created: usize,
            bytes_written: u64,
            duration_ms: u128,
            skipped: Vec<SkippedOutput>,
        }

        let data = ExtractionOutput {
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            symlinks_created: report.symlinks_created,
            hardlinks_created: report.hardlinks_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            skipped: report.skipped.iter().map(SkippedOutput::from).collect(),
        };

        let output = JsonOutput::success("extract", data);
        Self::output(&output)
    }

    fn format_plan(&self, outcome: &PlanOutcome) -> Result<()> {
        #[derive(Serialize)]
        struct PlannedOutput {
            path: String,
            original_path: String,
            kind: &'static str,
        }

        #[derive(Serialize)]
        struct PlanOutput {
            root_dir: String,
            accepted: Vec<PlannedOutput>,
            skipped: Vec<SkippedOutput>,
        }

        let data = PlanOutput {
            root_dir: outcome.plan.root_dir().to_string(),
            accepted: outcome
                .plan
                .members()
                .iter()
                .map(|m| PlannedOutput {
                    path: m.path.clone(),
                    original_path: m.original_path.clone(),
                    kind: m.action.kind().label(),
                })
                .collect(),
            skipped: outcome.skipped.iter().map(SkippedOutput::from).collect(),
        };

        let output = JsonOutput::success("inspect", data);
        Self::output(&output)
    }

    fn format_resolved_version(&self, resolved: &ResolvedVersion) -> Result<()> {
        #[derive(Serialize)]
        struct VersionOutput<'a> {
            version: &'a str,
            source: &'a VersionSource,
            tarball_url: String,
        }

        let data = VersionOutput {
            version: &resolved.tag,
            source: &resolved.source,
            tarball_url: resolved.tarball_url(),
        };

        let output = JsonOutput::success("resolve", data);
        Self::output(&output)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use xzsrc_core::SkipReason;

    #[test]
    fn test_error_output_structure() {
        let output = JsonOutput::error("extract", "boom");
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"status\":\"error\""));
        assert!(json.contains("\"error\":\"boom\""));
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn test_skipped_output_uses_display() {
        let skipped = SkippedMember {
            path: "fifo".into(),
            reason: SkipReason::UnsupportedKind,
        };
        let json = serde_json::to_string(&SkippedOutput::from(&skipped)).unwrap();
        assert_eq!(json, r#"{"path":"fifo","reason":"unsupported entry type"}"#);
    }
}
