//! Torrent metadata record
//!
//! The terminal value produced by a successful extraction.

use serde::{Serialize, Serializer};
use sha1::{Digest, Sha1};
use url::Url;

use crate::error::{ExtractionError, Result};

/// Length of a SHA-1 digest in bytes
pub const HASH_LEN: usize = 20;

/// A 20-byte SHA-1 digest
pub type Sha1Digest = [u8; HASH_LEN];

/// Metadata extracted from a single-file .torrent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TorrentMetadata {
    announce: String,
    #[serde(serialize_with = "serialize_hex")]
    info_hash: Sha1Digest,
    #[serde(serialize_with = "serialize_hex_list")]
    piece_hashes: Vec<Sha1Digest>,
    piece_length: u64,
    length: u64,
    name: String,
}

impl TorrentMetadata {
    pub(crate) fn new(
        announce: String,
        info_hash: Sha1Digest,
        piece_hashes: Vec<Sha1Digest>,
        piece_length: u64,
        length: u64,
        name: String,
    ) -> Self {
        Self {
            announce,
            info_hash,
            piece_hashes,
            piece_length,
            length,
            name,
        }
    }

    /// Tracker announce URL as it appears in the file
    pub fn announce(&self) -> &str {
        &self.announce
    }

    /// Parse the announce URL
    pub fn announce_url(&self) -> std::result::Result<Url, url::ParseError> {
        Url::parse(&self.announce)
    }

    /// SHA-1 of the raw `info` dictionary bytes
    pub fn info_hash(&self) -> &Sha1Digest {
        &self.info_hash
    }

    pub fn info_hash_hex(&self) -> String {
        hex::encode(self.info_hash)
    }

    pub fn piece_hashes(&self) -> &[Sha1Digest] {
        &self.piece_hashes
    }

    /// Nominal piece size in bytes
    pub fn piece_length(&self) -> u64 {
        self.piece_length
    }

    /// Total content size in bytes
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn piece_count(&self) -> usize {
        self.piece_hashes.len()
    }

    /// Number of pieces implied by `length` and `piece_length`
    pub fn expected_piece_count(&self) -> u64 {
        self.length.div_ceil(self.piece_length)
    }

    /// Get piece hash for a specific piece index
    pub fn piece_hash(&self, index: usize) -> Option<&Sha1Digest> {
        self.piece_hashes.get(index)
    }

    /// Byte range `[start, end)` covered by a piece; the last piece may be short
    pub fn piece_range(&self, index: usize) -> Option<(u64, u64)> {
        if index >= self.piece_hashes.len() {
            return None;
        }

        let start = (index as u64).checked_mul(self.piece_length)?;
        if start >= self.length {
            return None;
        }
        let end = start.saturating_add(self.piece_length).min(self.length);

        Some((start, end))
    }

    /// SHA-1 over raw bytes
    pub fn generate_info_hash(info_dict_bytes: &[u8]) -> Sha1Digest {
        let mut hasher = Sha1::new();
        hasher.update(info_dict_bytes);
        hasher.finalize().into()
    }

    /// Split the concatenated `pieces` string into 20-byte hashes, preserving order
    pub fn parse_piece_hashes(pieces_bytes: &[u8]) -> Result<Vec<Sha1Digest>> {
        if pieces_bytes.len() % HASH_LEN != 0 {
            return Err(ExtractionError::InvalidPieceData {
                len: pieces_bytes.len(),
            });
        }

        Ok(pieces_bytes
            .chunks_exact(HASH_LEN)
            .map(|chunk| {
                let mut hash = [0u8; HASH_LEN];
                hash.copy_from_slice(chunk);
                hash
            })
            .collect())
    }
}

fn serialize_hex<S: Serializer>(hash: &Sha1Digest, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(hash))
}

fn serialize_hex_list<S: Serializer>(
    hashes: &[Sha1Digest],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(hashes.iter().map(hex::encode))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(length: u64, pieces: Vec<Sha1Digest>) -> TorrentMetadata {
        TorrentMetadata::new(
            "http://tracker.example.com/announce".to_string(),
            [1u8; 20],
            pieces,
            1024,
            length,
            "test.bin".to_string(),
        )
    }

    #[test]
    fn test_accessors() {
        let meta = sample(2048, vec![[2u8; 20], [3u8; 20]]);

        assert_eq!(meta.announce(), "http://tracker.example.com/announce");
        assert_eq!(meta.name(), "test.bin");
        assert_eq!(meta.length(), 2048);
        assert_eq!(meta.piece_length(), 1024);
        assert_eq!(meta.piece_count(), 2);
        assert_eq!(meta.expected_piece_count(), 2);
        assert_eq!(meta.info_hash_hex(), hex::encode([1u8; 20]));
    }

    #[test]
    fn test_announce_url() {
        let meta = sample(0, vec![]);
        let url = meta.announce_url().unwrap();
        assert_eq!(url.host_str(), Some("tracker.example.com"));
        assert_eq!(url.path(), "/announce");
    }

    #[test]
    fn test_generate_info_hash() {
        // SHA-1 of the empty string
        let hash = TorrentMetadata::generate_info_hash(b"");
        assert_eq!(hex::encode(hash), "da39a3ee5e6b4b0d3255bfef95601890afd80709");

        let hash = TorrentMetadata::generate_info_hash(b"abc");
        assert_eq!(hex::encode(hash), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_parse_piece_hashes_valid() {
        let hashes: Vec<u8> = (0..40).map(|i| i as u8).collect();
        let result = TorrentMetadata::parse_piece_hashes(&hashes).unwrap();
        assert_eq!(result.len(), 2);
        let expected: Sha1Digest = (0..20).map(|i| i as u8).collect::<Vec<u8>>().try_into().unwrap();
        assert_eq!(result[0], expected);
        assert_eq!(result[1][0], 20);
    }

    #[test]
    fn test_parse_piece_hashes_invalid() {
        let hashes = vec![1u8; 45];
        assert!(matches!(
            TorrentMetadata::parse_piece_hashes(&hashes),
            Err(ExtractionError::InvalidPieceData { len: 45 })
        ));
    }

    #[test]
    fn test_parse_piece_hashes_empty() {
        assert!(TorrentMetadata::parse_piece_hashes(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_piece_hash() {
        let meta = sample(2048, vec![[2u8; 20], [3u8; 20]]);

        assert_eq!(meta.piece_hash(0), Some(&[2u8; 20]));
        assert_eq!(meta.piece_hash(1), Some(&[3u8; 20]));
        assert_eq!(meta.piece_hash(2), None);
    }

    #[test]
    fn test_piece_range() {
        let meta = sample(1500, vec![[2u8; 20], [3u8; 20]]);

        assert_eq!(meta.piece_range(0), Some((0, 1024)));
        assert_eq!(meta.piece_range(1), Some((1024, 1500)));
        assert_eq!(meta.piece_range(2), None);
    }

    #[test]
    fn test_piece_range_beyond_length() {
        // more hashes than the length needs
        let meta = sample(100, vec![[2u8; 20], [3u8; 20]]);
        assert_eq!(meta.expected_piece_count(), 1);
        assert_eq!(meta.piece_range(0), Some((0, 100)));
        assert_eq!(meta.piece_range(1), None);
    }

    #[test]
    fn test_serialize_json() {
        let meta = sample(2048, vec![[0xab; 20]]);
        let json: serde_json::Value = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["name"], "test.bin");
        assert_eq!(json["length"], 2048);
        assert_eq!(json["piece_length"], 1024);
        assert_eq!(json["info_hash"], hex::encode([1u8; 20]));
        assert_eq!(json["piece_hashes"][0], "ab".repeat(20));
    }
}
