//! Metadata extraction
//!
//! Decodes a .torrent buffer, validates the required fields and computes the
//! info hash over the exact raw bytes of the `info` dictionary.

use std::ops::Range;
use std::path::Path;

use tracing::{debug, info, trace, warn};

use crate::bencode::{decode_value, Cursor, DecodeOptions, DecodedValue, Dictionary};
use crate::error::{DecodeError, ExtractionError, Result};
use crate::torrent::metadata::TorrentMetadata;

/// Encoded form of the top-level `info` key, searched for by [`InfoHashStrategy::Scan`]
const INFO_KEY_MARKER: &[u8] = b"4:info";

/// How the raw `info` byte span is located
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InfoHashStrategy {
    /// Use the span recorded while decoding the top-level dictionary
    #[default]
    Span,
    /// Search the raw buffer for `4:info` and re-decode from there.
    ///
    /// Matches the first occurrence anywhere in the file, including inside
    /// other string values.
    Scan,
}

/// Extraction settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub decode: DecodeOptions,
    pub info_hash: InfoHashStrategy,
}

/// Extracts [`TorrentMetadata`] from .torrent files
#[derive(Debug, Clone, Default)]
pub struct MetadataExtractor {
    options: ExtractOptions,
}

impl MetadataExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Read and extract a .torrent file from disk
    pub fn extract(&self, path: impl AsRef<Path>) -> Result<TorrentMetadata> {
        let path = path.as_ref();
        debug!("Loading torrent file from: {}", path.display());

        let data = std::fs::read(path).map_err(|source| ExtractionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Read {} bytes from torrent file", data.len());
        self.extract_bytes(&data)
    }

    /// Extract metadata from an in-memory .torrent buffer
    pub fn extract_bytes(&self, data: &[u8]) -> Result<TorrentMetadata> {
        let mut cursor = Cursor::with_options(data, self.options.decode);
        let root = match decode_value(&mut cursor)? {
            DecodedValue::Dictionary(dict) => dict,
            other => {
                return Err(DecodeError::UnexpectedType {
                    offset: 0,
                    expected: "dictionary",
                    found: other.kind(),
                }
                .into())
            }
        };

        if !cursor.is_at_end() {
            if self.options.decode.strict {
                return Err(DecodeError::TrailingData {
                    offset: cursor.offset(),
                }
                .into());
            }
            warn!(
                "Ignoring {} trailing bytes after top-level dictionary",
                data.len() - cursor.offset()
            );
        }

        let announce = text_field(&root, "announce")?;
        let info_entry = root
            .entry(b"info")
            .ok_or(ExtractionError::MissingField("info"))?;
        let info_dict = info_entry
            .value
            .as_dict()
            .ok_or(ExtractionError::MissingField("info"))?;

        let name = text_field(info_dict, "name")?;
        let length = info_dict
            .get(b"length")
            .and_then(DecodedValue::as_integer)
            .and_then(|v| u64::try_from(v).ok())
            .ok_or(ExtractionError::MissingField("length"))?;
        let piece_length = info_dict
            .get(b"piece length")
            .and_then(DecodedValue::as_integer)
            .and_then(|v| u64::try_from(v).ok())
            .filter(|&v| v > 0)
            .ok_or(ExtractionError::MissingField("piece length"))?;
        let pieces = info_dict
            .get(b"pieces")
            .and_then(DecodedValue::as_bytes)
            .ok_or(ExtractionError::MissingField("pieces"))?;
        trace!(
            "Fields: name={:?} length={} piece_length={} pieces={} bytes",
            name,
            length,
            piece_length,
            pieces.len()
        );

        let piece_hashes = TorrentMetadata::parse_piece_hashes(pieces)?;

        let span = match self.options.info_hash {
            InfoHashStrategy::Span => info_entry.span.clone(),
            InfoHashStrategy::Scan => scan_info_span(data, self.options.decode)?,
        };
        debug!("Info dictionary span: {}..{}", span.start, span.end);
        let info_hash = TorrentMetadata::generate_info_hash(&data[span]);

        let metadata = TorrentMetadata::new(announce, info_hash, piece_hashes, piece_length, length, name);
        if metadata.piece_count() as u64 != metadata.expected_piece_count() {
            warn!(
                "Piece count {} does not match {} implied by length {} and piece length {}",
                metadata.piece_count(),
                metadata.expected_piece_count(),
                length,
                piece_length
            );
        }

        info!("Successfully extracted torrent metadata: {}", metadata.name());
        Ok(metadata)
    }
}

/// Read and extract a .torrent file with default options
pub fn extract(path: impl AsRef<Path>) -> Result<TorrentMetadata> {
    MetadataExtractor::default().extract(path)
}

/// Extract metadata from an in-memory buffer with default options
pub fn extract_bytes(data: &[u8]) -> Result<TorrentMetadata> {
    MetadataExtractor::default().extract_bytes(data)
}

fn text_field(dict: &Dictionary<'_>, key: &'static str) -> Result<String> {
    dict.get(key.as_bytes())
        .and_then(DecodedValue::as_bytes)
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .ok_or(ExtractionError::MissingField(key))
}

/// Locate `4:info` in the raw buffer and re-decode the value that follows it
fn scan_info_span(data: &[u8], options: DecodeOptions) -> Result<Range<usize>> {
    let start = data
        .windows(INFO_KEY_MARKER.len())
        .position(|window| window == INFO_KEY_MARKER)
        .map(|pos| pos + INFO_KEY_MARKER.len())
        // Only reachable without a validated top-level `info` key, whose
        // encoding always contains the marker.
        .ok_or_else(|| {
            ExtractionError::InfoHashComputationFailed("info key marker not found".to_string())
        })?;

    let mut cursor = Cursor::at_offset(data, start, options);
    decode_value(&mut cursor).map_err(|e| {
        ExtractionError::InfoHashComputationFailed(format!("re-decode at offset {}: {}", start, e))
    })?;

    Ok(start..cursor.offset())
}
