//! Key/value metadata block.
//!
//! Layout, repeated until the block ends:
//!
//! ```text
//! u32  keyAndValueByteSize
//! u8   keyAndValue[keyAndValueByteSize]   // "key\0value\0"
//! u8   valuePadding[0..=3]                // to a 4-byte boundary
//! ```
//!
//! Malformed input stops the walk; entries parsed up to that point are kept.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

/// Key that carries the texture orientation.
pub const ORIENTATION_KEY: &str = "KTXorientation";

/// One key/value pair from the metadata block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    key: String,
    value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value bytes without the terminating NUL.
    pub fn value_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Value as text (lossy UTF-8).
    pub fn value(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }
}

/// Flips needed to show the texture upright.
///
/// KTX data is stored bottom-up by GL convention, so without an explicit
/// `KTXorientation` key a vertical flip is assumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    None,
    #[default]
    Vertical,
    Horizontal,
    Both,
}

impl Orientation {
    const LOOKUP: [(&'static [u8; 7], Orientation); 4] = [
        (b"S=r,T=d", Orientation::None),
        (b"S=r,T=u", Orientation::Vertical),
        (b"S=l,T=d", Orientation::Horizontal),
        (b"S=l,T=u", Orientation::Both),
    ];

    /// Match a `KTXorientation` value. Only the S and T components are
    /// considered; anything after them (e.g. `,R=i`) is ignored.
    pub fn from_value(value: &[u8]) -> Option<Self> {
        Self::LOOKUP
            .iter()
            .find(|(prefix, _)| value.starts_with(&prefix[..]))
            .map(|&(_, orientation)| orientation)
    }

    pub fn flips_vertically(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }

    pub fn flips_horizontally(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }
}

/// Parsed key/value block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyValueData {
    entries: Vec<KeyValue>,
    orientation: Orientation,
}

impl KeyValueData {
    pub fn entries(&self) -> &[KeyValue] {
        &self.entries
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// First entry with the given key.
    pub fn get(&self, key: &str) -> Option<&KeyValue> {
        self.entries.iter().find(|kv| kv.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Walk a raw key/value block.
    ///
    /// `byteswap` controls whether the length prefixes are swapped from the
    /// file's byte order.
    pub(crate) fn parse(block: &[u8], byteswap: bool) -> Self {
        let mut data = Self::default();
        let mut seen_orientation = false;
        let mut pos = 0usize;

        while let Some(prefix) = block.get(pos..pos + 4) {
            let mut sz = u32::from_ne_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);
            if byteswap {
                sz = sz.swap_bytes();
            }
            let sz = sz as usize;
            let start = pos + 4;
            let Some(pair) = start
                .checked_add(sz)
                .and_then(|end| block.get(start..end))
            else {
                log::debug!("KTX key/value entry at {pos} runs past the block end; stopping");
                break;
            };

            let Some(key_end) = pair.iter().position(|&b| b == 0) else {
                log::debug!("KTX key/value entry at {pos} has no key terminator; stopping");
                break;
            };
            let value = &pair[key_end + 1..];
            if value.iter().position(|&b| b == 0) != Some(value.len().wrapping_sub(1)) {
                log::debug!("KTX key/value entry at {pos} has a malformed value; stopping");
                break;
            }
            let key = String::from_utf8_lossy(&pair[..key_end]).into_owned();
            let value = &value[..value.len() - 1];

            if !seen_orientation && key == ORIENTATION_KEY {
                seen_orientation = true;
                if let Some(orientation) = Orientation::from_value(value) {
                    data.orientation = orientation;
                }
            }
            data.entries.push(KeyValue::new(key, value));

            pos = start + sz.next_multiple_of(4);
        }

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn entry(key: &str, value: &str) -> Vec<u8> {
        let mut pair = Vec::new();
        pair.extend_from_slice(key.as_bytes());
        pair.push(0);
        pair.extend_from_slice(value.as_bytes());
        pair.push(0);
        let mut out = (pair.len() as u32).to_ne_bytes().to_vec();
        out.extend_from_slice(&pair);
        while out.len() % 4 != 0 {
            out.push(0);
        }
        out
    }

    #[test]
    fn parses_entries_in_order() {
        let mut block = entry("KTXwriter", "toktx v4");
        block.extend(entry("a", "b"));
        let data = KeyValueData::parse(&block, false);
        assert_eq!(data.len(), 2);
        assert_eq!(data.entries()[0].key(), "KTXwriter");
        assert_eq!(data.entries()[0].value(), "toktx v4");
        assert_eq!(data.entries()[1].value_bytes(), b"b");
        assert_eq!(data.orientation(), Orientation::Vertical);
    }

    #[test]
    fn byteswapped_prefixes() {
        let mut block = entry("key", "value");
        let sz = u32::from_ne_bytes(block[..4].try_into().unwrap());
        block[..4].copy_from_slice(&sz.swap_bytes().to_ne_bytes());
        let data = KeyValueData::parse(&block, true);
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("key").unwrap().value(), "value");
    }

    #[test]
    fn orientation_lookup() {
        for (value, expected) in [
            ("S=r,T=d", Orientation::None),
            ("S=r,T=u", Orientation::Vertical),
            ("S=l,T=d", Orientation::Horizontal),
            ("S=l,T=u", Orientation::Both),
            ("S=l,T=u,R=i", Orientation::Both),
        ] {
            let data = KeyValueData::parse(&entry(ORIENTATION_KEY, value), false);
            assert_eq!(data.orientation(), expected, "{value}");
        }
    }

    #[test]
    fn unrecognized_orientation_keeps_default() {
        let data = KeyValueData::parse(&entry(ORIENTATION_KEY, "S=x,T=y"), false);
        assert_eq!(data.orientation(), Orientation::Vertical);
        let data = KeyValueData::parse(&entry(ORIENTATION_KEY, "S=r"), false);
        assert_eq!(data.orientation(), Orientation::Vertical);
    }

    #[test]
    fn only_first_orientation_counts() {
        let mut block = entry(ORIENTATION_KEY, "bogus");
        block.extend(entry(ORIENTATION_KEY, "S=r,T=d"));
        let data = KeyValueData::parse(&block, false);
        assert_eq!(data.len(), 2);
        assert_eq!(data.orientation(), Orientation::Vertical);
    }

    #[test]
    fn truncated_entry_keeps_previous() {
        let mut block = entry("first", "1");
        let mut second = entry("second", "2");
        second.truncate(second.len() - 4);
        block.extend(second);
        let data = KeyValueData::parse(&block, false);
        assert_eq!(data.len(), 1);
        assert_eq!(data.entries()[0].key(), "first");
    }

    #[test]
    fn missing_terminators_stop() {
        let mut block = entry("ok", "fine");
        // No NUL at all.
        block.extend_from_slice(&4u32.to_ne_bytes());
        block.extend_from_slice(b"abcd");
        block.extend(entry("never", "reached"));
        let data = KeyValueData::parse(&block, false);
        assert_eq!(data.len(), 1);

        // Value NUL not at the end of the pair.
        let mut block = 6u32.to_ne_bytes().to_vec();
        block.extend_from_slice(b"k\0v\0x\0");
        block.extend_from_slice(&[0, 0]);
        assert!(KeyValueData::parse(&block, false).is_empty());

        // Key NUL is the last byte; no value terminator.
        let mut block = 4u32.to_ne_bytes().to_vec();
        block.extend_from_slice(b"key\0");
        assert!(KeyValueData::parse(&block, false).is_empty());
    }

    #[test]
    fn zero_length_and_trailing_bytes() {
        let block = vec![0u8; 4];
        assert!(KeyValueData::parse(&block, false).is_empty());

        let mut block = entry("k", "v");
        block.extend_from_slice(&[1, 2]);
        assert_eq!(KeyValueData::parse(&block, false).len(), 1);
    }

    #[test]
    fn huge_length_prefix_does_not_overflow() {
        let block = u32::MAX.to_ne_bytes().to_vec();
        assert!(KeyValueData::parse(&block, false).is_empty());
    }
}
