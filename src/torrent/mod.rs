//! Torrent metadata handling
//!
//! Extraction of single-file .torrent metadata on top of the bencode decoder.

pub mod extractor;
pub mod metadata;

pub use extractor::{extract, extract_bytes, ExtractOptions, InfoHashStrategy, MetadataExtractor};
pub use metadata::{Sha1Digest, TorrentMetadata, HASH_LEN};
