//! Diagnostic logging setup.
//!
//! Logs go to stderr so `--json` output on stdout stays parseable. `RUST_LOG`
//! overrides the level chosen from the flags.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "warn,xzsrc=info,xzsrc_core=info";

/// Filter directives implied by `--verbose` / `--quiet`.
pub const fn default_directives(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        DEFAULT_DIRECTIVES
    }
}

/// Installs the global `tracing` subscriber.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(true, false), "debug");
        assert_eq!(default_directives(false, true), "error");
        assert!(default_directives(false, false).contains("xzsrc_core=info"));
    }
}
