//! torrent-inspect
//!
//! Bencode decoding and .torrent metadata extraction with info hashes computed
//! over the exact raw bytes of the `info` dictionary.

pub mod bencode;
pub mod cli;
pub mod error;
pub mod torrent;

pub use error::{DecodeError, ExtractionError};

pub use bencode::{decode, decode_value, Cursor, DecodeOptions, DecodedValue, Dictionary};
pub use torrent::{
    extract, extract_bytes, ExtractOptions, InfoHashStrategy, MetadataExtractor, TorrentMetadata,
};
pub use cli::{CliArgs, Config, OutputFormat};
