//! Interned name text.
//!
//! All species, compartment, and title names are stored once in a
//! [`NameTable`]: a single byte blob of NUL-terminated strings addressed
//! by byte offset. Records and matrix entries carry offsets, never owned
//! strings, so the whole table can be copied verbatim into the state
//! arena and read back from a raw block.

use std::cmp::Ordering;

use indexmap::IndexMap;

/// A blob of NUL-terminated names with offset-based access.
///
/// Offset 0 is always the empty name. Interning the same name twice
/// returns the same offset; insertion order determines blob layout, so
/// two tables built from the same name sequence are byte-identical.
#[derive(Clone, Debug)]
pub struct NameTable {
    bytes: Vec<u8>,
    index: IndexMap<String, u32>,
}

impl NameTable {
    /// Create a table containing only the empty name at offset 0.
    pub fn new() -> Self {
        let mut table = Self {
            bytes: Vec::new(),
            index: IndexMap::new(),
        };
        table.intern("");
        table
    }

    /// Intern a name, returning its byte offset.
    ///
    /// Names must not contain NUL bytes; the terminator is implicit.
    pub fn intern(&mut self, name: &str) -> u32 {
        debug_assert!(!name.contains('\0'), "names must not contain NUL");
        if let Some(&offset) = self.index.get(name) {
            return offset;
        }
        let offset = self.bytes.len() as u32;
        self.bytes.extend_from_slice(name.as_bytes());
        self.bytes.push(0);
        self.index.insert(name.to_string(), offset);
        offset
    }

    /// Read the name stored at the given byte offset.
    ///
    /// Returns `None` if the offset is out of range or the stored bytes
    /// are not valid UTF-8 (possible only for a corrupt blob).
    pub fn get(&self, offset: u32) -> Option<&str> {
        let start = offset as usize;
        if start >= self.bytes.len() {
            return None;
        }
        let end = self.bytes[start..].iter().position(|&b| b == 0)? + start;
        std::str::from_utf8(&self.bytes[start..end]).ok()
    }

    /// The raw blob, including terminators.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Blob length in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Number of distinct names interned (including the empty name).
    pub fn name_count(&self) -> usize {
        self.index.len()
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-normalized lexicographic name comparison.
///
/// This is the name half of every directory comparator: ASCII case is
/// folded, so `"ATP"` and `"atp"` compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let a = a.bytes().map(|b| b.to_ascii_lowercase());
    let b = b.bytes().map(|b| b.to_ascii_lowercase());
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_offset_zero() {
        let table = NameTable::new();
        assert_eq!(table.get(0), Some(""));
    }

    #[test]
    fn intern_round_trips() {
        let mut table = NameTable::new();
        let atp = table.intern("ATP");
        let adp = table.intern("ADP");
        assert_ne!(atp, adp);
        assert_eq!(table.get(atp), Some("ATP"));
        assert_eq!(table.get(adp), Some("ADP"));
    }

    #[test]
    fn intern_is_idempotent() {
        let mut table = NameTable::new();
        let first = table.intern("glucose");
        let second = table.intern("glucose");
        assert_eq!(first, second);
        assert_eq!(table.name_count(), 2); // "" and "glucose"
    }

    #[test]
    fn out_of_range_offset_is_none() {
        let table = NameTable::new();
        assert_eq!(table.get(1000), None);
    }

    #[test]
    fn comparison_folds_case() {
        assert_eq!(compare_names("ATP", "atp"), Ordering::Equal);
        assert_eq!(compare_names("ADP", "atp"), Ordering::Less);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn all_interned_names_readable(
                names in prop::collection::vec("[a-zA-Z0-9_+-]{1,12}", 0..24),
            ) {
                let mut table = NameTable::new();
                let offsets: Vec<u32> = names.iter().map(|n| table.intern(n)).collect();
                for (name, offset) in names.iter().zip(offsets) {
                    prop_assert_eq!(table.get(offset), Some(name.as_str()));
                }
            }
        }
    }
}
