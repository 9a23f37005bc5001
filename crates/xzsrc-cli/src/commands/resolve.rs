//! Resolve command implementation

use crate::cli::ResolveArgs;
use crate::output::OutputFormatter;
use crate::version::resolve_version;
use anyhow::Result;

pub fn execute(
    args: &ResolveArgs,
    env_override: Option<&str>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let resolved = resolve_version(env_override, &args.config)?;
    formatter.format_resolved_version(&resolved)?;
    Ok(())
}
