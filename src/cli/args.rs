//! CLI arguments module
//!
//! Defines command-line argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::bencode::DEFAULT_MAX_DEPTH;
use crate::torrent::InfoHashStrategy;

/// CLI arguments for the metadata inspector
#[derive(Debug, Parser)]
#[command(name = "torrent-inspect")]
#[command(about = "Print the metadata and info hash of a .torrent file", long_about = None)]
pub struct CliArgs {
    /// Path to the .torrent file
    #[arg(value_name = "TORRENT_FILE")]
    pub torrent_file: PathBuf,

    /// Print metadata as JSON
    #[arg(long)]
    pub json: bool,

    /// List every piece hash
    #[arg(long)]
    pub pieces: bool,

    /// Reject non-canonical bencode (leading zeros, unsorted or duplicate keys, trailing data)
    #[arg(long)]
    pub strict: bool,

    /// Maximum nesting depth accepted by the decoder (1 to 1024)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// How to locate the raw info dictionary for hashing
    #[arg(long, value_enum, default_value_t = InfoHashStrategy::Span)]
    pub info_hash: InfoHashStrategy,

    /// Verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors; the metadata report is still printed
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Get the log level based on verbosity settings
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::ERROR
        } else {
            tracing::Level::WARN
        }
    }
}
