//! Recursive-descent bencode decoder
//!
//! The decoder walks a borrowed buffer with an explicit [`Cursor`]. Each
//! primitive either advances the cursor past the value it consumed or fails;
//! on failure the cursor is left where the failed value started.

use crate::bencode::value::{DecodedValue, Dictionary};
use crate::error::DecodeError;

/// Default limit on list/dictionary nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting of lists and dictionaries
    pub max_depth: usize,
    /// Reject non-canonical input: leading zeros, `-0`, duplicate or unsorted keys
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }
}

/// Position within a borrowed input buffer
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
    depth: usize,
    options: DecodeOptions,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            data,
            offset: 0,
            depth: 0,
            options,
        }
    }

    /// Start decoding at `offset` instead of the buffer start.
    ///
    /// Spans recorded by the decoder stay absolute to `data`. The offset is
    /// clamped to the buffer length.
    pub fn at_offset(data: &'a [u8], offset: usize, options: DecodeOptions) -> Self {
        Self {
            offset: offset.min(data.len()),
            ..Self::with_options(data, options)
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    fn nested<T>(
        &mut self,
        decode: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::NestingTooDeep {
                offset: self.offset,
                max_depth: self.options.max_depth,
            });
        }
        self.depth += 1;
        let result = decode(self);
        self.depth -= 1;
        result
    }
}

/// Decode one value at the cursor and advance past it
pub fn decode_value<'a>(cursor: &mut Cursor<'a>) -> Result<DecodedValue<'a>, DecodeError> {
    let start = cursor.offset;
    let result = match cursor.peek() {
        None => Err(DecodeError::UnexpectedEnd { offset: start }),
        Some(b'0'..=b'9') => decode_byte_string(cursor).map(DecodedValue::ByteString),
        Some(b'i') => decode_integer(cursor).map(DecodedValue::Integer),
        Some(b'l') => cursor.nested(decode_list).map(DecodedValue::List),
        Some(b'd') => cursor.nested(decode_dictionary).map(DecodedValue::Dictionary),
        Some(byte) => Err(DecodeError::InvalidTag { offset: start, byte }),
    };

    if result.is_err() {
        cursor.offset = start;
    }
    result
}

/// Decode a complete buffer holding exactly one value
pub fn decode(data: &[u8]) -> Result<DecodedValue<'_>, DecodeError> {
    decode_with(data, DecodeOptions::default())
}

/// Like [`decode`], with explicit options
pub fn decode_with(data: &[u8], options: DecodeOptions) -> Result<DecodedValue<'_>, DecodeError> {
    let mut cursor = Cursor::with_options(data, options);
    let value = decode_value(&mut cursor)?;

    if !cursor.is_at_end() {
        return Err(DecodeError::TrailingData {
            offset: cursor.offset,
        });
    }

    Ok(value)
}

/// Decode the first value in `data`, returning it with the number of bytes it occupies
pub fn decode_prefix(data: &[u8]) -> Result<(DecodedValue<'_>, usize), DecodeError> {
    let mut cursor = Cursor::new(data);
    let value = decode_value(&mut cursor)?;
    Ok((value, cursor.offset))
}

/// `<decimal-length>:<raw bytes>`
fn decode_byte_string<'a>(cursor: &mut Cursor<'a>) -> Result<&'a [u8], DecodeError> {
    let data = cursor.data;
    let start = cursor.offset;

    let mut colon = start;
    while colon < data.len() && data[colon] != b':' {
        if !data[colon].is_ascii_digit() {
            return Err(DecodeError::MalformedLength { offset: colon });
        }
        colon += 1;
    }

    if colon >= data.len() {
        return Err(DecodeError::UnexpectedEnd { offset: colon });
    }

    let digits = &data[start..colon];
    if cursor.options.strict && digits.len() > 1 && digits[0] == b'0' {
        return Err(DecodeError::NonCanonical {
            offset: start,
            reason: "leading zero in string length",
        });
    }

    // digits are ASCII, so from_utf8 cannot fail; parse fails on empty or overflow
    let length: usize = std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(DecodeError::MalformedLength { offset: start })?;

    let body = colon + 1;
    let end = body
        .checked_add(length)
        .filter(|&end| end <= data.len())
        .ok_or(DecodeError::LengthOutOfBounds {
            offset: start,
            length,
        })?;

    cursor.offset = end;
    Ok(&data[body..end])
}

/// `i<decimal>e`
fn decode_integer(cursor: &mut Cursor<'_>) -> Result<i64, DecodeError> {
    let data = cursor.data;
    let start = cursor.offset;
    let body = start + 1;

    let end = data[body..]
        .iter()
        .position(|&b| b == b'e')
        .map(|p| body + p)
        .ok_or(DecodeError::UnexpectedEnd { offset: data.len() })?;

    let digits = &data[body..end];
    let value: i64 = std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| DecodeError::MalformedInteger {
            offset: start,
            text: String::from_utf8_lossy(digits).into_owned(),
        })?;

    if cursor.options.strict {
        check_canonical_integer(digits, start)?;
    }

    cursor.offset = end + 1;
    Ok(value)
}

fn check_canonical_integer(digits: &[u8], offset: usize) -> Result<(), DecodeError> {
    let negative = digits.first() == Some(&b'-');
    let magnitude = if negative { &digits[1..] } else { digits };

    let reason = match magnitude {
        [b'0'] if negative => Some("negative zero"),
        [b'0', _, ..] => Some("leading zero in integer"),
        [first, ..] if !first.is_ascii_digit() => Some("explicit sign in integer"),
        _ => None,
    };

    match reason {
        Some(reason) => Err(DecodeError::NonCanonical { offset, reason }),
        None => Ok(()),
    }
}

/// `l<value>*e`
fn decode_list<'a>(cursor: &mut Cursor<'a>) -> Result<Vec<DecodedValue<'a>>, DecodeError> {
    cursor.offset += 1;
    let mut items = Vec::new();

    loop {
        match cursor.peek() {
            None => {
                return Err(DecodeError::UnexpectedEnd {
                    offset: cursor.offset,
                })
            }
            Some(b'e') => {
                cursor.offset += 1;
                return Ok(items);
            }
            Some(_) => items.push(decode_value(cursor)?),
        }
    }
}

/// `d(<byte-string key><value>)*e`
fn decode_dictionary<'a>(cursor: &mut Cursor<'a>) -> Result<Dictionary<'a>, DecodeError> {
    cursor.offset += 1;
    let mut dict = Dictionary::new();
    let mut previous: Option<&'a [u8]> = None;

    loop {
        let key_offset = cursor.offset;
        let key = match cursor.peek() {
            None => {
                return Err(DecodeError::UnexpectedEnd { offset: key_offset });
            }
            Some(b'e') => {
                cursor.offset += 1;
                return Ok(dict);
            }
            Some(b'0'..=b'9') => decode_byte_string(cursor).map_err(|err| match err {
                DecodeError::MalformedLength { .. } => DecodeError::InvalidKey { offset: key_offset },
                other => other,
            })?,
            Some(_) => return Err(DecodeError::InvalidKey { offset: key_offset }),
        };

        if cursor.options.strict {
            if let Some(prev) = previous {
                if key == prev {
                    return Err(DecodeError::DuplicateKey { offset: key_offset });
                }
                if key < prev {
                    return Err(DecodeError::UnsortedKeys { offset: key_offset });
                }
            }
        }

        let value_start = cursor.offset;
        let value = decode_value(cursor)?;
        dict.insert(key, value, value_start..cursor.offset);
        previous = Some(key);
    }
}
