//! Typed views over arena word spans.
//!
//! The arena's backing store is a single `Vec<u64>`. Sections hold
//! floats, signed integers, or packed text, all addressed by word span;
//! these views reinterpret the bits on access (`f64::from_bits`, `as`
//! casts, little-endian byte packing) so the block stays one
//! relocatable, serializable allocation with no raw pointer arithmetic.

use std::cmp::Ordering;

/// Read-only view of a float section.
#[derive(Clone, Copy, Debug)]
pub struct FloatView<'a> {
    words: &'a [u64],
}

impl<'a> FloatView<'a> {
    /// Wrap a word span.
    pub fn new(words: &'a [u64]) -> Self {
        Self { words }
    }

    /// Number of float slots (including alignment padding slots).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the section is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The float at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn get(&self, i: usize) -> f64 {
        f64::from_bits(self.words[i])
    }

    /// Iterate over the stored floats.
    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        self.words.iter().map(|&w| f64::from_bits(w))
    }

    /// Copy the first `len` floats out.
    pub fn to_vec(&self, len: usize) -> Vec<f64> {
        self.iter().take(len).collect()
    }
}

/// Mutable view of a float section.
#[derive(Debug)]
pub struct FloatViewMut<'a> {
    words: &'a mut [u64],
}

impl<'a> FloatViewMut<'a> {
    /// Wrap a word span.
    pub fn new(words: &'a mut [u64]) -> Self {
        Self { words }
    }

    /// Number of float slots.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the section is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The float at index `i`.
    pub fn get(&self, i: usize) -> f64 {
        f64::from_bits(self.words[i])
    }

    /// Store a float at index `i`.
    pub fn set(&mut self, i: usize, value: f64) {
        self.words[i] = value.to_bits();
    }

    /// Fill every slot with one value.
    pub fn fill(&mut self, value: f64) {
        self.words.fill(value.to_bits());
    }

    /// Copy a float slice into the section's prefix.
    ///
    /// # Panics
    ///
    /// Panics if `values` is longer than the section.
    pub fn copy_from(&mut self, values: &[f64]) {
        assert!(values.len() <= self.words.len(), "source longer than section");
        for (slot, &value) in self.words.iter_mut().zip(values) {
            *slot = value.to_bits();
        }
    }
}

/// Read-only view of an integer section.
#[derive(Clone, Copy, Debug)]
pub struct IntView<'a> {
    words: &'a [u64],
}

impl<'a> IntView<'a> {
    /// Wrap a word span.
    pub fn new(words: &'a [u64]) -> Self {
        Self { words }
    }

    /// Number of integer slots.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the section is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The integer at index `i`.
    pub fn get(&self, i: usize) -> i64 {
        self.words[i] as i64
    }

    /// Iterate over the stored integers.
    pub fn iter(&self) -> impl Iterator<Item = i64> + 'a {
        self.words.iter().map(|&w| w as i64)
    }

    /// Copy the first `len` integers out.
    pub fn to_vec(&self, len: usize) -> Vec<i64> {
        self.iter().take(len).collect()
    }
}

/// Mutable view of an integer section.
#[derive(Debug)]
pub struct IntViewMut<'a> {
    words: &'a mut [u64],
}

impl<'a> IntViewMut<'a> {
    /// Wrap a word span.
    pub fn new(words: &'a mut [u64]) -> Self {
        Self { words }
    }

    /// Number of integer slots.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the section is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The integer at index `i`.
    pub fn get(&self, i: usize) -> i64 {
        self.words[i] as i64
    }

    /// Store an integer at index `i`.
    pub fn set(&mut self, i: usize, value: i64) {
        self.words[i] = value as u64;
    }

    /// Copy an integer slice into the section's prefix.
    pub fn copy_from(&mut self, values: &[i64]) {
        assert!(values.len() <= self.words.len(), "source longer than section");
        for (slot, &value) in self.words.iter_mut().zip(values) {
            *slot = value as u64;
        }
    }
}

/// Read-only view of a packed text section.
///
/// Bytes are packed little-endian, eight per word, preserving the
/// NUL-terminated layout of the network name tables.
#[derive(Clone, Copy, Debug)]
pub struct TextView<'a> {
    words: &'a [u64],
}

impl<'a> TextView<'a> {
    /// Wrap a word span.
    pub fn new(words: &'a [u64]) -> Self {
        Self { words }
    }

    /// Capacity in bytes.
    pub fn byte_len(&self) -> usize {
        self.words.len() * 8
    }

    /// The byte at offset `i`, or NUL past the end.
    pub fn byte(&self, i: usize) -> u8 {
        if i >= self.byte_len() {
            return 0;
        }
        (self.words[i / 8] >> ((i % 8) * 8)) as u8
    }

    /// Read the NUL-terminated name starting at a byte offset.
    pub fn name_at(&self, offset: usize) -> String {
        let mut name = Vec::new();
        let mut i = offset;
        loop {
            let b = self.byte(i);
            if b == 0 {
                break;
            }
            name.push(b);
            i += 1;
        }
        String::from_utf8_lossy(&name).into_owned()
    }

    /// Compare a needle against the stored name at `offset`,
    /// case-normalized, without allocating.
    ///
    /// Returns how the needle orders relative to the stored name.
    pub fn compare_name(&self, needle: &str, offset: usize) -> Ordering {
        let mut i = offset;
        for nb in needle.bytes().map(|b| b.to_ascii_lowercase()) {
            let sb = self.byte(i);
            if sb == 0 {
                // Stored name is a strict prefix of the needle.
                return Ordering::Greater;
            }
            let sb = sb.to_ascii_lowercase();
            if nb != sb {
                return nb.cmp(&sb);
            }
            i += 1;
        }
        if self.byte(i) == 0 {
            Ordering::Equal
        } else {
            Ordering::Less
        }
    }
}

/// Pack a byte slice into a word span, little-endian, zero-filled.
///
/// # Panics
///
/// Panics if the span is too short for the bytes.
pub fn pack_bytes(words: &mut [u64], bytes: &[u8]) {
    assert!(bytes.len() <= words.len() * 8, "bytes longer than span");
    for (i, &b) in bytes.iter().enumerate() {
        words[i / 8] |= u64::from(b) << ((i % 8) * 8);
    }
}
