//! Error types for decoding and metadata extraction
//!
//! Decoder errors carry the byte offset at which they were detected.
//! Extraction errors wrap them and add the field-level failures.

use std::path::PathBuf;

use thiserror::Error;

/// Bencode syntax violations reported by the decoder
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Byte at a value position is not `i`, `l`, `d` or a digit
    #[error("invalid tag byte 0x{byte:02x} at offset {offset}")]
    InvalidTag { offset: usize, byte: u8 },

    /// Non-digit inside a byte-string length prefix, or a length that overflows
    #[error("malformed string length at offset {offset}")]
    MalformedLength { offset: usize },

    /// Declared byte-string length runs past the end of the buffer
    #[error("string of length {length} at offset {offset} exceeds buffer bounds")]
    LengthOutOfBounds { offset: usize, length: usize },

    /// Buffer ended before a terminator was found
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEnd { offset: usize },

    /// Integer body does not parse as a signed 64-bit integer
    #[error("malformed integer {text:?} at offset {offset}")]
    MalformedInteger { offset: usize, text: String },

    /// Dictionary key is not a byte string
    #[error("dictionary key at offset {offset} is not a byte string")]
    InvalidKey { offset: usize },

    /// Nesting exceeded the configured depth limit
    #[error("nesting deeper than {max_depth} at offset {offset}")]
    NestingTooDeep { offset: usize, max_depth: usize },

    /// Strict mode: leading zeros, `-0` or an explicit `+` sign
    #[error("non-canonical encoding at offset {offset}: {reason}")]
    NonCanonical { offset: usize, reason: &'static str },

    /// Strict mode: a key appears twice in one dictionary
    #[error("duplicate dictionary key at offset {offset}")]
    DuplicateKey { offset: usize },

    /// Strict mode: keys are not in ascending raw-byte order
    #[error("dictionary keys out of order at offset {offset}")]
    UnsortedKeys { offset: usize },

    /// Bytes remain after a complete top-level value
    #[error("trailing data at offset {offset}")]
    TrailingData { offset: usize },

    /// A well-formed value of the wrong kind where a specific kind is required
    #[error("expected {expected} at offset {offset}, found {found}")]
    UnexpectedType {
        offset: usize,
        expected: &'static str,
        found: &'static str,
    },
}

impl DecodeError {
    /// Byte offset where the violation was detected
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::InvalidTag { offset, .. }
            | DecodeError::MalformedLength { offset }
            | DecodeError::LengthOutOfBounds { offset, .. }
            | DecodeError::UnexpectedEnd { offset }
            | DecodeError::MalformedInteger { offset, .. }
            | DecodeError::InvalidKey { offset }
            | DecodeError::NestingTooDeep { offset, .. }
            | DecodeError::NonCanonical { offset, .. }
            | DecodeError::DuplicateKey { offset }
            | DecodeError::UnsortedKeys { offset }
            | DecodeError::TrailingData { offset }
            | DecodeError::UnexpectedType { offset, .. } => *offset,
        }
    }
}

/// Failures of a single metadata extraction call
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Reading the torrent file failed
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not bencode, or the top-level value is not a dictionary
    #[error("malformed input: {0}")]
    MalformedInput(#[from] DecodeError),

    /// Required field absent, of the wrong type, or out of range
    #[error("missing or invalid field: {0}")]
    MissingField(&'static str),

    /// `pieces` length is not a multiple of 20
    #[error("pieces field length {len} is not a multiple of 20")]
    InvalidPieceData { len: usize },

    /// The raw `info` span could not be located or re-decoded
    #[error("failed to compute info hash: {0}")]
    InfoHashComputationFailed(String),
}

pub type Result<T, E = ExtractionError> = std::result::Result<T, E>;
