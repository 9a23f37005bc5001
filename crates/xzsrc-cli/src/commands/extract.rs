//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use xzsrc_core::extract_archive;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let output_dir = super::output_dir(args)?;
    let config = args.config();

    let report = add_archive_context(
        extract_archive(&args.archive, &output_dir, &config),
        &args.archive,
    )?;

    formatter.format_extraction_result(&report)?;

    Ok(())
}
