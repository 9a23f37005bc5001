//! Inspect command implementation

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use xzsrc_core::inspect_archive;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let output_dir = super::output_dir(args)?;

    let outcome = add_archive_context(
        inspect_archive(&args.archive, &output_dir, &args.config()),
        &args.archive,
    )?;

    formatter.format_plan(&outcome)?;

    Ok(())
}
