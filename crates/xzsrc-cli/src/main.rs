//! xzsrc CLI - Command-line utility for preparing XZ Utils sources from
//! release tarballs.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod version;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Read once; nothing below consults the environment again.
    let version_override = std::env::var(version::VERSION_ENV).ok();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    let (operation, result) = match &cli.command {
        cli::Commands::Extract(args) => ("extract", commands::extract::execute(args, &*formatter)),
        cli::Commands::Inspect(args) => ("inspect", commands::inspect::execute(args, &*formatter)),
        cli::Commands::Resolve(args) => (
            "resolve",
            commands::resolve::execute(args, version_override.as_deref(), &*formatter),
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(operation, &err);
            ExitCode::FAILURE
        }
    }
}
