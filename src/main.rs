//! torrent-inspect - Main entry point
//!
//! Reads a .torrent file and prints its metadata and info hash.

use anyhow::{Context, Result};
use std::path::Path;
use torrent_inspect::cli::{render_json, render_text};
use torrent_inspect::{CliArgs, Config, MetadataExtractor, OutputFormat, TorrentMetadata};
use tracing::{debug, error, info};

fn main() -> Result<()> {
    let args = CliArgs::parse_args();

    init_logging(&args);
    debug!("CLI arguments: {:?}", args);

    let config = Config::from_args(&args);
    config.validate().context("Invalid configuration")?;

    let metadata = load_torrent_file(&config.torrent_file, &config)?;

    let rendered = match config.output {
        OutputFormat::Text => render_text(&metadata, config.show_pieces),
        OutputFormat::Json => render_json(&metadata).context("Failed to serialize metadata")?,
    };
    print!("{}", rendered);
    if config.output == OutputFormat::Json {
        println!();
    }

    Ok(())
}

/// Initialize logging based on verbosity settings
fn init_logging(args: &CliArgs) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if args.is_verbose() {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    debug!("Logging initialized with level {:?}", args.log_level());
}

/// Load and extract the torrent file
fn load_torrent_file(path: &Path, config: &Config) -> Result<TorrentMetadata> {
    info!("Loading torrent file: {}", path.display());

    let extractor = MetadataExtractor::new(config.extract_options());
    let metadata = extractor
        .extract(path)
        .map_err(|e| {
            error!("Failed to extract torrent file '{}': {}", path.display(), e);
            e
        })
        .with_context(|| format!("Failed to load torrent file {}", path.display()))?;

    info!("Loaded torrent: {} ({} pieces)", metadata.name(), metadata.piece_count());
    Ok(metadata)
}
