//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::version::ResolvedVersion;
use anyhow::Result;
use console::Term;
use console::style;
use xzsrc_core::ExtractionReport;
use xzsrc_core::PlanOutcome;
use xzsrc_core::SkippedMember;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn write_heading(&self, text: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(text);
        }
    }

    fn write_skipped(&self, skipped: &[SkippedMember]) {
        if skipped.is_empty() {
            return;
        }

        let _ = self.term.write_line("");
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{}", style("Skipped:").yellow().bold()));
        } else {
            let _ = self.term.write_line("Skipped:");
        }
        for member in skipped {
            let _ = self
                .term
                .write_line(&format!("  - {}: {}", member.path, member.reason));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_heading("Extraction complete");

        let _ = self
            .term
            .write_line(&format!("  Files extracted: {}", report.files_extracted));
        let _ = self
            .term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));
        if report.has_skipped() {
            let _ = self
                .term
                .write_line(&format!("  Members skipped: {}", report.files_skipped()));
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Symlinks: {}", report.symlinks_created));
            let _ = self
                .term
                .write_line(&format!("  Hardlinks: {}", report.hardlinks_created));
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
            self.write_skipped(&report.skipped);
        }

        Ok(())
    }

    fn format_plan(&self, outcome: &PlanOutcome) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self
            .term
            .write_line(&format!("Archive root: {}", outcome.plan.root_dir()));
        let _ = self.term.write_line("");

        for member in outcome.plan.members() {
            let _ = self.term.write_line(&format!(
                "  {:<8} {}",
                member.action.kind().label(),
                member.path
            ));
        }

        self.write_skipped(&outcome.skipped);

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Total: {} accepted, {} rejected",
            outcome.plan.len(),
            outcome.skipped.len()
        ));

        Ok(())
    }

    fn format_resolved_version(&self, resolved: &ResolvedVersion) -> Result<()> {
        if self.quiet {
            let _ = self.term.write_line(&resolved.tag);
            return Ok(());
        }

        self.write_heading(&format!("XZ Utils {}", resolved.tag));
        let _ = self
            .term
            .write_line(&format!("  Source: {}", resolved.source));
        let _ = self
            .term
            .write_line(&format!("  Tarball: {}", resolved.tarball_url()));

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
