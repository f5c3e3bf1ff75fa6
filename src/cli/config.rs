//! CLI configuration module
//!
//! Turns parsed arguments into validated extraction and output settings.

use crate::bencode::DecodeOptions;
use crate::cli::args::CliArgs;
use crate::torrent::{ExtractOptions, InfoHashStrategy};
use anyhow::Result;
use std::path::PathBuf;

/// Largest `--max-depth` accepted; deeper recursion risks overflowing the stack
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// How extracted metadata is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Configuration for one inspector run
#[derive(Debug, Clone)]
pub struct Config {
    /// Torrent file to inspect
    pub torrent_file: PathBuf,
    pub output: OutputFormat,
    /// Print every piece hash in text output
    pub show_pieces: bool,
    /// Decoder nesting limit
    pub max_depth: usize,
    /// Reject non-canonical bencode
    pub strict: bool,
    pub info_hash: InfoHashStrategy,
    pub verbose: bool,
    pub quiet: bool,
}

impl Config {
    /// Create configuration from CLI arguments
    pub fn from_args(args: &CliArgs) -> Self {
        let output = if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self {
            torrent_file: args.torrent_file.clone(),
            output,
            show_pieces: args.pieces,
            max_depth: args.max_depth,
            strict: args.strict,
            info_hash: args.info_hash,
            verbose: args.verbose,
            quiet: args.quiet,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.torrent_file.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("torrent_file cannot be empty"));
        }

        if self.max_depth == 0 {
            return Err(anyhow::anyhow!("max_depth must be at least 1"));
        }

        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(anyhow::anyhow!(
                "max_depth must be at most {}",
                MAX_DEPTH_LIMIT
            ));
        }

        if self.verbose && self.quiet {
            return Err(anyhow::anyhow!("verbose and quiet are mutually exclusive"));
        }

        Ok(())
    }

    /// Extraction settings for this run
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            decode: DecodeOptions {
                max_depth: self.max_depth,
                strict: self.strict,
            },
            info_hash: self.info_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bencode::DEFAULT_MAX_DEPTH;

    fn base_config() -> Config {
        Config {
            torrent_file: PathBuf::from("test.torrent"),
            output: OutputFormat::Text,
            show_pieces: false,
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
            info_hash: InfoHashStrategy::Span,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_config_from_args() {
        let args = CliArgs {
            torrent_file: PathBuf::from("/tmp/a.torrent"),
            json: true,
            pieces: true,
            strict: true,
            max_depth: 16,
            info_hash: InfoHashStrategy::Scan,
            verbose: true,
            quiet: false,
        };

        let config = Config::from_args(&args);

        assert_eq!(config.torrent_file, PathBuf::from("/tmp/a.torrent"));
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.show_pieces);
        assert!(config.strict);
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.info_hash, InfoHashStrategy::Scan);
        assert!(config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_config_validate() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_config_validate_zero_depth() {
        let config = Config {
            max_depth: 0,
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_excessive_depth() {
        let at_limit = Config {
            max_depth: MAX_DEPTH_LIMIT,
            ..base_config()
        };
        assert!(at_limit.validate().is_ok());

        let config = Config {
            max_depth: 1_000_000,
            ..base_config()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "max_depth must be at most 1024");
    }

    #[test]
    fn test_config_validate_empty_path() {
        let config = Config {
            torrent_file: PathBuf::new(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_verbose_and_quiet() {
        let config = Config {
            verbose: true,
            quiet: true,
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extract_options() {
        let config = Config {
            max_depth: 10,
            strict: true,
            info_hash: InfoHashStrategy::Scan,
            ..base_config()
        };

        let options = config.extract_options();
        assert_eq!(options.decode.max_depth, 10);
        assert!(options.decode.strict);
        assert_eq!(options.info_hash, InfoHashStrategy::Scan);
    }
}
