//! Decoded bencode values
//!
//! Byte strings borrow from the decoded buffer. Dictionaries keep their
//! entries in insertion order together with the raw byte span of each value.

use std::collections::HashMap;
use std::ops::Range;

/// A single decoded bencode value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue<'a> {
    Integer(i64),
    ByteString(&'a [u8]),
    List(Vec<DecodedValue<'a>>),
    Dictionary(Dictionary<'a>),
}

impl<'a> DecodedValue<'a> {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DecodedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            DecodedValue::ByteString(b) => Some(*b),
            _ => None,
        }
    }

    /// Byte string as UTF-8, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_list(&self) -> Option<&[DecodedValue<'a>]> {
        match self {
            DecodedValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary<'a>> {
        match self {
            DecodedValue::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            DecodedValue::Integer(_) => "integer",
            DecodedValue::ByteString(_) => "byte string",
            DecodedValue::List(_) => "list",
            DecodedValue::Dictionary(_) => "dictionary",
        }
    }
}

/// One key/value pair of a dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry<'a> {
    pub key: &'a [u8],
    pub value: DecodedValue<'a>,
    /// Absolute byte range of the encoded value within the decoded buffer
    pub span: Range<usize>,
}

/// Insertion-ordered mapping from byte-string keys to values
///
/// Entries live in a `Vec` so iteration follows the encoded order. `index`
/// maps each key to its position in `entries`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary<'a> {
    entries: Vec<DictEntry<'a>>,
    index: HashMap<&'a [u8], usize>,
}

impl<'a> Dictionary<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any earlier value under the same key in place.
    ///
    /// Returns the replaced value.
    pub fn insert(
        &mut self,
        key: &'a [u8],
        value: DecodedValue<'a>,
        span: Range<usize>,
    ) -> Option<DecodedValue<'a>> {
        match self.index.get(key) {
            Some(&pos) => {
                let entry = &mut self.entries[pos];
                entry.span = span;
                Some(std::mem::replace(&mut entry.value, value))
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(DictEntry { key, value, span });
                None
            }
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&DecodedValue<'a>> {
        self.entry(key).map(|e| &e.value)
    }

    /// Raw byte span of the value stored under `key`
    pub fn span(&self, key: &[u8]) -> Option<Range<usize>> {
        self.entry(key).map(|e| e.span.clone())
    }

    pub fn entry(&self, key: &[u8]) -> Option<&DictEntry<'a>> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a [u8], &DecodedValue<'a>)> + '_ {
        self.entries.iter().map(|e| (e.key, &e.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let int = DecodedValue::Integer(-7);
        assert_eq!(int.as_integer(), Some(-7));
        assert_eq!(int.as_bytes(), None);
        assert_eq!(int.kind(), "integer");

        let bytes = DecodedValue::ByteString(b"spam");
        assert_eq!(bytes.as_bytes(), Some(b"spam".as_ref()));
        assert_eq!(bytes.as_str(), Some("spam"));
        assert!(bytes.as_dict().is_none());

        let invalid_utf8 = DecodedValue::ByteString(&[0xff, 0xfe]);
        assert!(invalid_utf8.as_bytes().is_some());
        assert_eq!(invalid_utf8.as_str(), None);
    }

    #[test]
    fn test_dictionary_preserves_insertion_order() {
        let mut dict = Dictionary::new();
        dict.insert(b"zebra", DecodedValue::Integer(1), 0..3);
        dict.insert(b"apple", DecodedValue::Integer(2), 3..6);

        let keys: Vec<_> = dict.keys().collect();
        assert_eq!(keys, vec![b"zebra".as_ref(), b"apple".as_ref()]);
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_dictionary_last_write_wins() {
        let mut dict = Dictionary::new();
        assert!(dict.insert(b"key", DecodedValue::Integer(1), 0..3).is_none());
        let old = dict.insert(b"key", DecodedValue::Integer(2), 10..13);

        assert_eq!(old, Some(DecodedValue::Integer(1)));
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get(b"key"), Some(&DecodedValue::Integer(2)));
        assert_eq!(dict.span(b"key"), Some(10..13));
    }

    #[test]
    fn test_dictionary_missing_key() {
        let dict = Dictionary::new();
        assert!(dict.is_empty());
        assert!(dict.get(b"info").is_none());
        assert!(dict.span(b"info").is_none());
        assert!(!dict.contains_key(b"info"));
    }

    #[test]
    fn test_dictionary_lookup_after_many_inserts() {
        let keys: Vec<String> = (0..5_000).map(|i| format!("{:08}", i)).collect();
        let mut dict = Dictionary::new();
        for (i, key) in keys.iter().enumerate() {
            dict.insert(key.as_bytes(), DecodedValue::Integer(i as i64), i..i + 1);
        }
        // Overwrite one key; its position must not move.
        dict.insert(keys[42].as_bytes(), DecodedValue::Integer(-1), 0..0);

        assert_eq!(dict.len(), 5_000);
        assert_eq!(dict.get(b"00004999"), Some(&DecodedValue::Integer(4999)));
        assert_eq!(dict.span(b"00001234"), Some(1234..1235));
        assert_eq!(dict.get(b"00000042"), Some(&DecodedValue::Integer(-1)));
        assert_eq!(dict.keys().nth(42), Some(b"00000042".as_ref()));
        assert!(!dict.contains_key(b"00005000"));
    }
}
