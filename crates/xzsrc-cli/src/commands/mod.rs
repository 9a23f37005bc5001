//! Subcommand implementations.

pub mod extract;
pub mod inspect;
pub mod resolve;

use crate::cli::ExtractArgs;
use anyhow::Context;
use anyhow::Result;
use std::path::PathBuf;

/// Output directory from the arguments, or the current directory.
fn output_dir(args: &ExtractArgs) -> Result<PathBuf> {
    match &args.output_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}
