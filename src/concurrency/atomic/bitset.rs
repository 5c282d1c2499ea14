//! Word-packed atomic bitsets.
//!
//! This is a dense alternative to `Vec<AtomicBool>` for visited sets / flags.

use core::sync::atomic::{AtomicUsize, Ordering};

/// A word-packed atomic bitset.
///
/// Bits can only be set, never cleared, so a set bit stays set for the
/// lifetime of the bitset.
pub struct AtomicBitset {
    bits: usize,
    words: Vec<AtomicUsize>,
}

impl AtomicBitset {
    /// Creates a new bitset with `bits` bits, all cleared.
    pub fn new(bits: usize) -> Self {
        let word_bits = usize::BITS as usize;
        let words_len = bits.div_ceil(word_bits);
        let words = (0..words_len).map(|_| AtomicUsize::new(0)).collect();
        Self { bits, words }
    }

    /// Returns whether `bit` is set.
    ///
    /// # Panics
    /// Panics if `bit` is not below the size given to [`AtomicBitset::new`].
    #[inline]
    pub fn is_set(&self, bit: usize, order: Ordering) -> bool {
        assert!(bit < self.bits, "bit {bit} out of bounds for {}", self.bits);
        let (word, mask) = bit_word_mask(bit);
        (self.words[word].load(order) & mask) != 0
    }

    /// Sets `bit` and returns `true` iff this call observed it previously cleared.
    ///
    /// # Panics
    /// Panics if `bit` is not below the size given to [`AtomicBitset::new`].
    #[inline]
    pub fn test_and_set(&self, bit: usize, order: Ordering) -> bool {
        assert!(bit < self.bits, "bit {bit} out of bounds for {}", self.bits);
        let (word, mask) = bit_word_mask(bit);
        let prev = self.words[word].fetch_or(mask, order);
        (prev & mask) == 0
    }

    /// Population count of the whole set.
    ///
    /// Under concurrent writers this is a snapshot: every bit counted was set at
    /// some point during the call, and the result never decreases between calls.
    pub fn count_ones(&self, order: Ordering) -> usize {
        self.words
            .iter()
            .map(|w| w.load(order).count_ones() as usize)
            .sum()
    }
}

impl core::fmt::Debug for AtomicBitset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AtomicBitset")
            .field("bits", &self.bits)
            .field("ones", &self.count_ones(Ordering::Relaxed))
            .finish()
    }
}

#[inline(always)]
fn bit_word_mask(bit: usize) -> (usize, usize) {
    // `usize::BITS` is always a power-of-two (32 or 64), so use shifts/masks.
    let shift = usize::BITS.trailing_zeros();
    let word = bit >> shift;
    let offset = bit & (usize::BITS as usize - 1);
    (word, 1usize << offset)
}
