//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;
use xzsrc_core::ExtractConfig;
use xzsrc_core::config::DEFAULT_ROOT_NAME;

#[derive(Parser)]
#[command(name = "xzsrc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a source tarball under a fixed root directory
    Extract(ExtractArgs),
    /// Show which members would be extracted, without writing anything
    Inspect(ExtractArgs),
    /// Resolve the XZ Utils release to fetch and its tarball URL
    Resolve(ResolveArgs),
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the tarball (.tar, .tar.gz or .tar.xz)
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Name that replaces the archive's top-level directory
    #[arg(long, value_name = "NAME", default_value = DEFAULT_ROOT_NAME)]
    pub root_name: String,

    /// Maximum single file size when the native filter is disabled
    #[arg(long, value_parser = parse_byte_size)]
    pub max_file_size: Option<u64>,

    /// Disable the native member filter and enforce the size ceiling
    #[arg(long)]
    pub no_native_filter: bool,
}

impl ExtractArgs {
    /// Extraction policy described by the flags.
    pub fn config(&self) -> ExtractConfig {
        let mut config = ExtractConfig::default()
            .with_root_name(self.root_name.clone())
            .with_native_filter(!self.no_native_filter);
        if let Some(max) = self.max_file_size {
            config = config.with_max_file_size(max);
        }
        config
    }
}

#[derive(clap::Args)]
pub struct ResolveArgs {
    /// Version configuration file
    #[arg(long, value_name = "PATH", default_value = "xz-version.json")]
    pub config: PathBuf,
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
