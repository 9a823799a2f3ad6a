//! Fixed-width bit vector used to encode bipartitions of tips.

use std::fmt;

/// Number of bits per storage word
const WORD_BITS: usize = 64;

// =#========================================================================#=
// BITSET
// =#========================================================================#=
/// A fixed-width bit vector.
///
/// Width is set on construction and never changes; bit positions refer to
/// tip positions of a [TipIndex](crate::model::TipIndex). Bits beyond
/// `len` in the last word are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitset {
    words: Vec<u64>,
    len: usize,
}

impl Bitset {
    /// Creates a bitset of width `len` with all bits cleared.
    pub fn new(len: usize) -> Self {
        Bitset {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Returns the width of this bitset.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether this bitset has width zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets bit `bit`.
    ///
    /// # Panics
    /// Panics if `bit` is out of range.
    pub fn insert(&mut self, bit: usize) {
        assert!(bit < self.len, "bit {} out of range for width {}", bit, self.len);
        self.words[bit / WORD_BITS] |= 1 << (bit % WORD_BITS);
    }

    /// Returns whether bit `bit` is set; out-of-range bits are never set.
    pub fn contains(&self, bit: usize) -> bool {
        bit < self.len && self.words[bit / WORD_BITS] & (1 << (bit % WORD_BITS)) != 0
    }

    /// Sets every bit that is set in `other`.
    ///
    /// # Panics
    /// Panics if widths differ.
    pub fn union_with(&mut self, other: &Bitset) {
        assert_eq!(self.len, other.len, "cannot union bitsets of different width");
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word |= other_word;
        }
    }

    /// Clears all bits, keeping the width.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns an iterator over the positions of set bits in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&bit| self.contains(bit))
    }
}

impl fmt::Display for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in 0..self.len {
            f.write_str(if self.contains(bit) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains_across_words() {
        let mut bitset = Bitset::new(130);
        bitset.insert(0);
        bitset.insert(64);
        bitset.insert(129);
        assert!(bitset.contains(0));
        assert!(bitset.contains(64));
        assert!(bitset.contains(129));
        assert!(!bitset.contains(1));
        assert!(!bitset.contains(500));
        assert_eq!(bitset.count_ones(), 3);
        assert_eq!(bitset.ones().collect::<Vec<_>>(), vec![0, 64, 129]);
    }

    #[test]
    fn test_union_and_clear() {
        let mut left = Bitset::new(5);
        let mut right = Bitset::new(5);
        left.insert(1);
        right.insert(3);
        left.union_with(&right);
        assert_eq!(left.to_string(), "01010");

        left.clear();
        assert_eq!(left.count_ones(), 0);
        assert_eq!(left.len(), 5);
    }

    #[test]
    #[should_panic]
    fn test_insert_out_of_range_panics() {
        Bitset::new(3).insert(3);
    }
}
