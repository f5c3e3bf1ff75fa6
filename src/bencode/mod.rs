//! Bencode decoding
//!
//! Recursive-descent decoder over a borrowed buffer. Dictionaries remember the
//! raw byte span of every value so callers can hash or re-slice the original
//! encoding without re-serializing.

pub mod decoder;
pub mod value;

pub use decoder::{
    decode, decode_prefix, decode_value, decode_with, Cursor, DecodeOptions, DEFAULT_MAX_DEPTH,
};
pub use value::{DecodedValue, DictEntry, Dictionary};
