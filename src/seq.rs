//! BitSeq - dynamically-sized bit sequence packed into 32-bit words.
//!
//! This module provides the owning container: a contiguous array of words
//! holding one logical bit per element, with word-level bulk operations
//! layered on top via [`crate::range`].
//!
//! # Design
//!
//! - `Vec<u32>` word storage; bit indexing: `word_idx = bit_idx / 32`,
//!   `bit_offset = bit_idx % 32`
//! - `len` tracks the logical bit count; capacity is always a whole number
//!   of words, with a floor of two words for any non-empty sequence
//! - Every bit at index `>= len` in the word array is kept zero, so
//!   whole-word fast paths (popcount, comparison, bitwise operators) never
//!   see stale padding
//!
//! # Examples
//!
//! ```
//! use bitseq::BitSeq;
//!
//! let mut seq = BitSeq::with_len(1024, false).unwrap();
//! seq.set_bit(5);
//! seq.set_bit(10);
//! assert_eq!(seq.count_ones(), 2);
//! assert_eq!(seq.ones().collect::<Vec<_>>(), vec![5, 10]);
//! ```

use std::fmt;
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Range, ShlAssign,
    ShrAssign,
};
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{BitSeqError, Result};
use crate::pos::BitRefMut;
use crate::range;
use crate::word::mask_lo;

/// Word type for bit storage (32-bit unsigned integer)
pub type Word = u32;

/// Number of bits per word
pub const BITS_PER_WORD: usize = 32;

/// Maximum number of logical bits a sequence may hold.
///
/// Keeps every bit/word computation and the backing byte count inside
/// `isize::MAX` on all supported platforms. Requests beyond it fail with
/// [`BitSeqError::CapacityOverflow`].
pub const MAX_BITS: usize = usize::MAX >> 3;

/// Capacity floor for non-empty sequences, in words.
const MIN_WORDS: usize = 2;

/// Number of words needed to cover `n` bits.
#[inline(always)]
const fn words_for(n: usize) -> usize {
    (n + BITS_PER_WORD - 1) / BITS_PER_WORD
}

/// Dynamically-sized bit sequence using 32-bit word storage.
///
/// Provides bit-level operations with word-level performance. All bit
/// indices are 0-based. Cloning deep-copies the words; moving a sequence
/// (or `std::mem::take`) leaves nothing behind in the source.
///
/// Range-taking methods delegate to the boundary-aware algorithms in
/// [`crate::range`]; see that module for the masking contract.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BitSeq {
    /// Storage words (32-bit); bits at index `>= len` are zero
    words: Vec<Word>,
    /// Logical number of bits
    len: usize,
}

impl BitSeq {
    /// Create an empty sequence. Allocates nothing.
    #[inline]
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
        }
    }

    /// Create a sequence of `len` bits, every bit set to `bit`.
    ///
    /// # Errors
    ///
    /// Returns [`BitSeqError::CapacityOverflow`] if `len > MAX_BITS`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitseq::BitSeq;
    ///
    /// let seq = BitSeq::with_len(100, true).unwrap();
    /// assert_eq!(seq.len(), 100);
    /// assert_eq!(seq.count_ones(), 100);
    /// assert_eq!(seq.capacity() % 32, 0);
    /// ```
    pub fn with_len(len: usize, bit: bool) -> Result<Self> {
        if len > MAX_BITS {
            return Err(BitSeqError::CapacityOverflow {
                requested: len,
                max: MAX_BITS,
            });
        }
        let num_words = if len == 0 {
            0
        } else {
            words_for(len).max(MIN_WORDS)
        };
        let mut seq = Self {
            words: vec![0; num_words],
            len,
        };
        if bit {
            range::fill_bits(&mut seq.words, 0, len, true);
        }
        Ok(seq)
    }

    /// Create a sequence of `len` bits from a fixed-width pattern.
    ///
    /// Pattern bit `i` maps to logical bit `i`; pattern bits at index
    /// `>= len` do not fit and are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`BitSeqError::CapacityOverflow`] if `len > MAX_BITS`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitseq::BitSeq;
    ///
    /// let seq = BitSeq::from_value(0b1011, 8).unwrap();
    /// assert!(seq.get_bit(0) && seq.get_bit(1) && !seq.get_bit(2) && seq.get_bit(3));
    /// assert_eq!(seq.to_string(), "00001011");
    /// ```
    pub fn from_value(value: u64, len: usize) -> Result<Self> {
        let mut seq = Self::with_len(len, false)?;
        if len > 0 {
            seq.words[0] = value as Word;
            if len > BITS_PER_WORD {
                seq.words[1] = (value >> BITS_PER_WORD) as Word;
            }
            seq.mask_padding();
        }
        Ok(seq)
    }

    // =========================================================================
    // Size and Growth
    // =========================================================================

    /// Logical number of bits.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the sequence holds no bits.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit capacity: always a whole number of words.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.words.len() * BITS_PER_WORD
    }

    /// Number of words in storage.
    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Resize to `new_len` bits; new bits take the value `bit`.
    ///
    /// Growth that outruns capacity reallocates with doubling slack to
    /// amortize repeated appends. Shrinking keeps capacity (use
    /// [`shrink_to_fit`](Self::shrink_to_fit) to release it) and re-zeros
    /// the dropped bits.
    ///
    /// Reallocation invalidates anything borrowed from the sequence, which
    /// the borrow checker enforces.
    ///
    /// # Errors
    ///
    /// Returns [`BitSeqError::CapacityOverflow`] if `new_len > MAX_BITS`.
    pub fn resize(&mut self, new_len: usize, bit: bool) -> Result<()> {
        if new_len > MAX_BITS {
            return Err(BitSeqError::CapacityOverflow {
                requested: new_len,
                max: MAX_BITS,
            });
        }
        if new_len > self.len {
            let needed = words_for(new_len);
            if needed > self.words.len() {
                let target = needed.max(self.words.len() * 2).max(MIN_WORDS);
                self.words.resize(target, 0);
            }
            let old_len = self.len;
            self.len = new_len;
            if bit {
                range::fill_bits(&mut self.words, old_len, new_len, true);
            }
        } else {
            self.len = new_len;
            self.mask_padding();
        }
        Ok(())
    }

    /// Ensure capacity for at least `capacity_bits` bits, rounding up to a
    /// whole number of words. Never shrinks.
    ///
    /// # Errors
    ///
    /// Returns [`BitSeqError::CapacityOverflow`] if
    /// `capacity_bits > MAX_BITS`.
    pub fn reserve(&mut self, capacity_bits: usize) -> Result<()> {
        if capacity_bits > MAX_BITS {
            return Err(BitSeqError::CapacityOverflow {
                requested: capacity_bits,
                max: MAX_BITS,
            });
        }
        if capacity_bits > 0 {
            let target = words_for(capacity_bits).max(MIN_WORDS);
            if target > self.words.len() {
                self.words.resize(target, 0);
            }
        }
        Ok(())
    }

    /// Reduce capacity to the minimum word count covering `len()`, with the
    /// usual two-word floor for non-empty sequences. An empty sequence
    /// drops its allocation entirely.
    pub fn shrink_to_fit(&mut self) {
        let target = if self.len == 0 {
            0
        } else {
            words_for(self.len).max(MIN_WORDS).min(self.words.len())
        };
        self.words.truncate(target);
        self.words.shrink_to_fit();
    }

    /// Shorten the sequence to `new_len` bits. No effect if already shorter.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len < self.len {
            self.len = new_len;
            self.mask_padding();
        }
    }

    /// Remove all bits, keeping capacity.
    pub fn clear(&mut self) {
        self.len = 0;
        self.words.fill(0);
    }

    /// Append a bit.
    ///
    /// # Panics
    ///
    /// Panics if the sequence already holds [`MAX_BITS`] bits.
    pub fn push(&mut self, bit: bool) {
        assert!(self.len < MAX_BITS, "bit sequence length overflow");
        if self.len == self.capacity() {
            let target = (self.words.len() * 2).max(MIN_WORDS);
            self.words.resize(target, 0);
        }
        let index = self.len;
        self.len += 1;
        if bit {
            self.set_bit(index);
        }
    }

    /// Remove and return the last bit, or `None` if empty.
    pub fn pop(&mut self) -> Option<bool> {
        if self.len == 0 {
            return None;
        }
        let index = self.len - 1;
        let bit = self.get_bit(index);
        self.clear_bit(index);
        self.len = index;
        Some(bit)
    }

    /// Zero every padding bit at index `>= len`.
    fn mask_padding(&mut self) {
        let occupied = words_for(self.len);
        for w in &mut self.words[occupied..] {
            *w = 0;
        }
        let tail = self.len % BITS_PER_WORD;
        if tail != 0 {
            self.words[occupied - 1] &= mask_lo::<Word>(tail as u32);
        }
    }

    // =========================================================================
    // Single Bit Operations
    // =========================================================================

    /// Get bit at position `b`.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `b >= len`.
    #[inline]
    pub fn get_bit(&self, b: usize) -> bool {
        debug_assert!(b < self.len, "bit index {} out of bounds (length: {})", b, self.len);
        (self.words[b / BITS_PER_WORD] >> (b % BITS_PER_WORD)) & 1 == 1
    }

    /// Set bit at position `b` to 1.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `b >= len`.
    #[inline]
    pub fn set_bit(&mut self, b: usize) {
        debug_assert!(b < self.len, "bit index {} out of bounds (length: {})", b, self.len);
        self.words[b / BITS_PER_WORD] |= 1 << (b % BITS_PER_WORD);
    }

    /// Clear bit at position `b` (set to 0).
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `b >= len`.
    #[inline]
    pub fn clear_bit(&mut self, b: usize) {
        debug_assert!(b < self.len, "bit index {} out of bounds (length: {})", b, self.len);
        self.words[b / BITS_PER_WORD] &= !(1 << (b % BITS_PER_WORD));
    }

    /// Toggle bit at position `b`.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `b >= len`.
    #[inline]
    pub fn toggle_bit(&mut self, b: usize) {
        debug_assert!(b < self.len, "bit index {} out of bounds (length: {})", b, self.len);
        self.words[b / BITS_PER_WORD] ^= 1 << (b % BITS_PER_WORD);
    }

    /// Assign bit at position `b`.
    #[inline]
    pub fn assign_bit(&mut self, b: usize, value: bool) {
        self.bit_mut(b).set(value);
    }

    /// Mutable proxy handle for bit `b`.
    ///
    /// The handle borrows the sequence; like any borrow it cannot outlive a
    /// reallocation.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `b >= len`.
    #[inline]
    pub fn bit_mut(&mut self, b: usize) -> BitRefMut<'_, Word> {
        debug_assert!(b < self.len, "bit index {} out of bounds (length: {})", b, self.len);
        BitRefMut::new(
            &mut self.words[b / BITS_PER_WORD],
            (b % BITS_PER_WORD) as u32,
        )
    }

    // =========================================================================
    // Whole-Sequence Operations
    // =========================================================================

    /// Set all bits to 1.
    pub fn set_all(&mut self) {
        range::fill_bits(&mut self.words, 0, self.len, true);
    }

    /// Clear all bits to 0.
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Toggle all bits (word-level complement, padding untouched).
    pub fn toggle_all(&mut self) {
        range::flip_bits(&mut self.words, 0, self.len);
    }

    /// Count set bits (hardware popcount per word).
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Count cleared bits.
    #[inline]
    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    /// Count positions set in both sequences (bitwise AND + popcount).
    ///
    /// # Panics
    ///
    /// Panics if the sequences have different lengths.
    pub fn count_overlap(&self, other: &BitSeq) -> usize {
        assert_eq!(
            self.len, other.len,
            "bit sequences must have the same length"
        );
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    // =========================================================================
    // Range Operations
    // =========================================================================

    /// Fill `range` with `bit`.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the range is reversed or ends past `len`.
    pub fn fill_range(&mut self, range: Range<usize>, bit: bool) {
        self.check_range(&range);
        range::fill_bits(&mut self.words, range.start, range.end, bit);
    }

    /// Set `range` to 1.
    pub fn set_range(&mut self, range: Range<usize>) {
        self.fill_range(range, true);
    }

    /// Clear `range` to 0.
    pub fn clear_range(&mut self, range: Range<usize>) {
        self.fill_range(range, false);
    }

    /// Complement `range` in place.
    pub fn toggle_range(&mut self, range: Range<usize>) {
        self.check_range(&range);
        range::flip_bits(&mut self.words, range.start, range.end);
    }

    /// Copy `src_range` of `src` into this sequence starting at `dst_start`.
    ///
    /// Any pair of alignments is handled; see [`range::copy_bits`].
    ///
    /// # Panics
    ///
    /// Panics in debug mode if either range falls outside its sequence.
    pub fn copy_from(&mut self, dst_start: usize, src: &BitSeq, src_range: Range<usize>) {
        debug_assert!(src_range.start <= src_range.end, "reversed source range");
        debug_assert!(src_range.end <= src.len, "source range out of bounds");
        debug_assert!(
            dst_start + (src_range.end - src_range.start) <= self.len,
            "destination range out of bounds"
        );
        range::copy_bits(
            &src.words,
            src_range.start,
            &mut self.words,
            dst_start,
            src_range.end - src_range.start,
        );
    }

    /// Copy `src_range` to `dst_start` within this sequence; the ranges may
    /// overlap (`memmove` semantics).
    pub fn copy_within(&mut self, src_range: Range<usize>, dst_start: usize) {
        self.check_range(&src_range);
        let len = src_range.end - src_range.start;
        debug_assert!(dst_start + len <= self.len, "destination range out of bounds");
        range::copy_bits_within(&mut self.words, src_range.start, dst_start, len);
    }

    /// Write the complement of `src_range` of `src` into this sequence
    /// starting at `dst_start`.
    pub fn flip_from(&mut self, dst_start: usize, src: &BitSeq, src_range: Range<usize>) {
        debug_assert!(src_range.start <= src_range.end, "reversed source range");
        debug_assert!(src_range.end <= src.len, "source range out of bounds");
        debug_assert!(
            dst_start + (src_range.end - src_range.start) <= self.len,
            "destination range out of bounds"
        );
        range::flip_bits_from(
            &src.words,
            src_range.start,
            &mut self.words,
            dst_start,
            src_range.end - src_range.start,
        );
    }

    /// Compare `len` bits of `self` at `self_start` against `other` at
    /// `other_range`; `false` immediately if the lengths differ.
    pub fn eq_range(&self, self_start: usize, other: &BitSeq, other_range: Range<usize>) -> bool {
        debug_assert!(other_range.start <= other_range.end, "reversed range");
        debug_assert!(other_range.end <= other.len, "range out of bounds");
        let n = other_range.end - other_range.start;
        if self_start + n > self.len {
            return false;
        }
        range::eq_bits(&self.words, self_start, &other.words, other_range.start, n)
    }

    /// First index in `range` holding `bit`.
    pub fn find_bit(&self, range: Range<usize>, bit: bool) -> Option<usize> {
        self.check_range(&range);
        range::find_bit(&self.words, range.start, range.end, bit)
    }

    /// First index in `range` starting a run of at least `count` bits equal
    /// to `bit`; runs straddling word boundaries count like any other.
    pub fn search_n(&self, range: Range<usize>, count: usize, bit: bool) -> Option<usize> {
        self.check_range(&range);
        range::search_n(&self.words, range.start, range.end, count, bit)
    }

    /// Maximal run of `bit` touching its first occurrence in `range`,
    /// assuming the range is partitioned (zeros before ones).
    pub fn equal_range(&self, range: Range<usize>, bit: bool) -> Range<usize> {
        self.check_range(&range);
        range::equal_range(&self.words, range.start, range.end, bit)
    }

    /// Left-rotate `range` so the bit at `mid` becomes its first bit.
    ///
    /// # Panics
    ///
    /// Panics in debug mode unless `range.start <= mid <= range.end <= len`.
    pub fn rotate(&mut self, range: Range<usize>, mid: usize) {
        self.check_range(&range);
        debug_assert!(
            range.start <= mid && mid <= range.end,
            "rotation point {} outside {}..{}",
            mid,
            range.start,
            range.end
        );
        range::rotate_bits(&mut self.words, range.start, mid, range.end);
    }

    /// Advance `range` to the lexicographically next arrangement of its
    /// bits; see [`range::next_permutation_bits`].
    pub fn next_permutation(&mut self, range: Range<usize>) -> bool {
        self.check_range(&range);
        range::next_permutation_bits(&mut self.words, range.start, range.end)
    }

    /// Step `range` back to the lexicographically previous arrangement of
    /// its bits; see [`range::prev_permutation_bits`].
    pub fn prev_permutation(&mut self, range: Range<usize>) -> bool {
        self.check_range(&range);
        range::prev_permutation_bits(&mut self.words, range.start, range.end)
    }

    #[inline]
    fn check_range(&self, range: &Range<usize>) {
        debug_assert!(
            range.start <= range.end,
            "reversed range {}..{}",
            range.start,
            range.end
        );
        debug_assert!(
            range.end <= self.len,
            "range end {} out of bounds (length: {})",
            range.end,
            self.len
        );
    }

    // =========================================================================
    // Random Operations
    // =========================================================================

    /// Randomly shuffle all bits using the Fisher-Yates algorithm.
    pub fn random_shuffle<R: Rng>(&mut self, rng: &mut R) {
        for i in (1..self.len).rev() {
            let j = rng.gen_range(0..=i);
            let tmp = self.get_bit(i);
            let other = self.bit_mut(j).replace(tmp);
            self.assign_bit(i, other);
        }
    }

    /// Randomly set exactly `num` bits to 1.
    ///
    /// Clears all bits, sets the first `num`, then shuffles.
    pub fn random_set_num<R: Rng>(&mut self, rng: &mut R, num: usize) {
        debug_assert!(num <= self.len);
        self.clear_all();
        range::fill_bits(&mut self.words, 0, num.min(self.len), true);
        self.random_shuffle(rng);
    }

    /// Randomly set approximately `pct * len` bits to 1.
    ///
    /// `pct` should be in range [0.0, 1.0].
    pub fn random_set_pct<R: Rng>(&mut self, rng: &mut R, pct: f64) {
        debug_assert!((0.0..=1.0).contains(&pct));
        let num = (self.len as f64 * pct).round() as usize;
        self.random_set_num(rng, num.min(self.len));
    }

    // =========================================================================
    // Information and Access
    // =========================================================================

    /// Direct read-only access to word storage.
    #[inline]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Direct mutable access to word storage.
    ///
    /// Callers must leave padding bits (index `>= len` ) zero; the
    /// whole-word fast paths rely on it.
    #[inline]
    pub fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    /// Estimate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.words.capacity() * std::mem::size_of::<Word>()
    }
}

// =============================================================================
// Bitwise Operators
// =============================================================================

impl BitAndAssign<&BitSeq> for BitSeq {
    /// Word-level AND. Panics if the lengths differ.
    fn bitand_assign(&mut self, rhs: &BitSeq) {
        assert_eq!(self.len, rhs.len, "bit sequences must have the same length");
        for (a, b) in self.words.iter_mut().zip(rhs.words.iter()) {
            *a &= *b;
        }
        // Our extra capacity words beyond rhs's storage are already zero.
    }
}

impl BitOrAssign<&BitSeq> for BitSeq {
    /// Word-level OR. Panics if the lengths differ.
    fn bitor_assign(&mut self, rhs: &BitSeq) {
        assert_eq!(self.len, rhs.len, "bit sequences must have the same length");
        for (a, b) in self.words.iter_mut().zip(rhs.words.iter()) {
            *a |= *b;
        }
    }
}

impl BitXorAssign<&BitSeq> for BitSeq {
    /// Word-level XOR. Panics if the lengths differ.
    fn bitxor_assign(&mut self, rhs: &BitSeq) {
        assert_eq!(self.len, rhs.len, "bit sequences must have the same length");
        for (a, b) in self.words.iter_mut().zip(rhs.words.iter()) {
            *a ^= *b;
        }
    }
}

impl BitAnd for &BitSeq {
    type Output = BitSeq;

    fn bitand(self, rhs: Self) -> BitSeq {
        let mut result = self.clone();
        result &= rhs;
        result
    }
}

impl BitAnd for BitSeq {
    type Output = BitSeq;

    fn bitand(self, rhs: Self) -> BitSeq {
        &self & &rhs
    }
}

impl BitOr for &BitSeq {
    type Output = BitSeq;

    fn bitor(self, rhs: Self) -> BitSeq {
        let mut result = self.clone();
        result |= rhs;
        result
    }
}

impl BitOr for BitSeq {
    type Output = BitSeq;

    fn bitor(self, rhs: Self) -> BitSeq {
        &self | &rhs
    }
}

impl BitXor for &BitSeq {
    type Output = BitSeq;

    fn bitxor(self, rhs: Self) -> BitSeq {
        let mut result = self.clone();
        result ^= rhs;
        result
    }
}

impl BitXor for BitSeq {
    type Output = BitSeq;

    fn bitxor(self, rhs: Self) -> BitSeq {
        &self ^ &rhs
    }
}

impl Not for &BitSeq {
    type Output = BitSeq;

    fn not(self) -> BitSeq {
        let mut result = self.clone();
        result.toggle_all();
        result
    }
}

impl Not for BitSeq {
    type Output = BitSeq;

    fn not(self) -> BitSeq {
        !&self
    }
}

// =============================================================================
// Whole-Sequence Shifts
// =============================================================================

impl ShlAssign<usize> for BitSeq {
    /// Logical shift toward the front of the sequence:
    /// `bit[i] = bit[i + n]`, vacated high-index positions zero-filled.
    /// Fixed-width, not a rotate; `n >= len` clears the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitseq::BitSeq;
    ///
    /// let mut x: BitSeq = "0111".parse().unwrap();
    /// x <<= 1;
    /// assert_eq!(x.to_string(), "0011");
    /// ```
    fn shl_assign(&mut self, n: usize) {
        if n >= self.len {
            self.clear_all();
            return;
        }
        let kept = self.len - n;
        range::copy_bits_within(&mut self.words, n, 0, kept);
        range::fill_bits(&mut self.words, kept, self.len, false);
    }
}

impl ShrAssign<usize> for BitSeq {
    /// Logical shift toward the back of the sequence:
    /// `bit[i] = bit[i - n]`, vacated low-index positions zero-filled.
    /// Fixed-width, not a rotate; `n >= len` clears the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitseq::BitSeq;
    ///
    /// let mut x: BitSeq = "0111".parse().unwrap();
    /// x >>= 1;
    /// assert_eq!(x.to_string(), "1110");
    /// ```
    fn shr_assign(&mut self, n: usize) {
        if n >= self.len {
            self.clear_all();
            return;
        }
        let kept = self.len - n;
        range::copy_bits_within(&mut self.words, 0, n, kept);
        range::fill_bits(&mut self.words, 0, n, false);
    }
}

// =============================================================================
// Comparison Operators
// =============================================================================

impl PartialEq for BitSeq {
    /// Word-level comparison (compiles to memcmp over the occupied words);
    /// capacity slack never participates.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let occupied = words_for(self.len);
        self.len == other.len && self.words[..occupied] == other.words[..occupied]
    }
}

impl Eq for BitSeq {}

impl PartialEq<u64> for BitSeq {
    /// Compare against a fixed-width pattern: equal when both agree on
    /// every index below `min(len, 64)` and neither has a set bit at or
    /// above that point.
    fn eq(&self, other: &u64) -> bool {
        let lo = self.words.first().copied().unwrap_or(0) as u64;
        let hi = self.words.get(1).copied().unwrap_or(0) as u64;
        lo | (hi << BITS_PER_WORD) == *other && self.words.iter().skip(2).all(|&w| w == 0)
    }
}

// =============================================================================
// Conversions and Rendering
// =============================================================================

impl From<u64> for BitSeq {
    /// A 64-bit sequence holding the pattern, bit `i` to bit `i`.
    fn from(value: u64) -> Self {
        // 64 bits is far below MAX_BITS.
        Self::from_value(value, 64).unwrap()
    }
}

impl From<&[bool]> for BitSeq {
    fn from(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }
}

impl FromIterator<bool> for BitSeq {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut seq = BitSeq::new();
        seq.extend(iter);
        seq
    }
}

impl Extend<bool> for BitSeq {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

impl fmt::Display for BitSeq {
    /// Big-endian bit string: the most significant logical bit first, so
    /// display index 0 corresponds to logical bit `len - 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitseq::BitSeq;
    ///
    /// let mut seq = BitSeq::with_len(8, false).unwrap();
    /// seq.set_bit(0);
    /// seq.set_bit(6);
    /// assert_eq!(seq.to_string(), "01000001");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.len);
        for i in (0..self.len).rev() {
            out.push(if self.get_bit(i) { '1' } else { '0' });
        }
        f.write_str(&out)
    }
}

impl FromStr for BitSeq {
    type Err = BitSeqError;

    /// Parse the textual rendering back: first character maps to the
    /// highest logical bit. Round-trips with [`fmt::Display`].
    fn from_str(s: &str) -> Result<Self> {
        let len = s.chars().count();
        let mut seq = Self::with_len(len, false)?;
        for (position, ch) in s.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => seq.set_bit(len - 1 - position),
                found => return Err(BitSeqError::Parse { position, found }),
            }
        }
        Ok(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_new() {
        let seq = BitSeq::new();
        assert_eq!(seq.len(), 0);
        assert!(seq.is_empty());
        assert_eq!(seq.capacity(), 0);
        assert_eq!(seq.num_words(), 0);
    }

    #[test]
    fn test_with_len() {
        let seq = BitSeq::with_len(1024, false).unwrap();
        assert_eq!(seq.len(), 1024);
        assert_eq!(seq.num_words(), 32);
        assert_eq!(seq.count_ones(), 0);

        let seq = BitSeq::with_len(100, true).unwrap();
        assert_eq!(seq.count_ones(), 100);
        // Padding beyond bit 100 stays zero.
        assert_eq!(seq.words()[3] & !((1u32 << 4) - 1), 0);
    }

    #[test]
    fn test_capacity_floor_and_rounding() {
        // Non-empty sequences get at least two words.
        assert_eq!(BitSeq::with_len(1, false).unwrap().capacity(), 64);
        assert_eq!(BitSeq::with_len(64, false).unwrap().capacity(), 64);
        assert_eq!(BitSeq::with_len(65, false).unwrap().capacity(), 96);
        assert_eq!(BitSeq::new().capacity(), 0);
    }

    #[test]
    fn test_capacity_ceiling() {
        let err = BitSeq::with_len(MAX_BITS + 1, false).unwrap_err();
        assert_eq!(
            err,
            BitSeqError::CapacityOverflow {
                requested: MAX_BITS + 1,
                max: MAX_BITS
            }
        );

        let mut seq = BitSeq::new();
        assert!(seq.resize(MAX_BITS + 1, false).is_err());
        assert!(seq.reserve(MAX_BITS + 1).is_err());
        assert_eq!(seq.len(), 0);
    }

    #[test]
    fn test_resize_grow_fill() {
        let mut seq = BitSeq::with_len(10, false).unwrap();
        seq.set_bit(3);
        seq.resize(100, true).unwrap();
        assert_eq!(seq.len(), 100);
        // Old bits kept, new bits take the fill value.
        assert!(seq.get_bit(3));
        assert!(!seq.get_bit(4));
        assert!(seq.get_bit(10));
        assert!(seq.get_bit(99));
        assert_eq!(seq.count_ones(), 91);
    }

    #[test]
    fn test_resize_shrink_rezeros() {
        let mut seq = BitSeq::with_len(100, true).unwrap();
        let capacity = seq.capacity();
        seq.resize(40, false).unwrap();
        assert_eq!(seq.len(), 40);
        assert_eq!(seq.capacity(), capacity); // capacity kept
        assert_eq!(seq.count_ones(), 40);
        // Growing again exposes only zeros.
        seq.resize(100, false).unwrap();
        assert_eq!(seq.count_ones(), 40);
    }

    #[test]
    fn test_resize_doubles_capacity() {
        let mut seq = BitSeq::with_len(64, false).unwrap();
        assert_eq!(seq.num_words(), 2);
        seq.resize(65, false).unwrap();
        assert_eq!(seq.num_words(), 4); // doubled, not minimal
    }

    #[test]
    fn test_reserve_and_shrink() {
        let mut seq = BitSeq::with_len(33, false).unwrap();
        seq.reserve(256).unwrap();
        assert_eq!(seq.capacity(), 256);
        seq.reserve(10).unwrap(); // never shrinks
        assert_eq!(seq.capacity(), 256);

        seq.shrink_to_fit();
        assert_eq!(seq.capacity(), 64); // words_for(33) = 2 words exactly

        seq.truncate(1);
        seq.shrink_to_fit();
        assert_eq!(seq.capacity(), 64); // two-word floor

        seq.truncate(0);
        seq.shrink_to_fit();
        assert_eq!(seq.capacity(), 0); // empty drops the allocation
    }

    #[test]
    fn test_set_get_clear_toggle() {
        let mut seq = BitSeq::with_len(64, false).unwrap();
        assert!(!seq.get_bit(37));
        seq.set_bit(37);
        assert!(seq.get_bit(37));
        seq.clear_bit(37);
        assert!(!seq.get_bit(37));
        seq.toggle_bit(37);
        assert!(seq.get_bit(37));
        seq.assign_bit(37, false);
        assert!(!seq.get_bit(37));
    }

    #[test]
    fn test_bit_mut_proxy() {
        let mut seq = BitSeq::with_len(64, false).unwrap();
        assert!(!seq.bit_mut(40).replace(true));
        assert!(seq.get_bit(40));
        seq.bit_mut(40).flip();
        assert!(!seq.get_bit(40));
    }

    #[test]
    fn test_whole_sequence_ops() {
        let mut seq = BitSeq::with_len(100, false).unwrap();
        seq.set_all();
        assert_eq!(seq.count_ones(), 100);
        // set_all never dirties padding.
        assert_eq!(seq.words()[3], (1u32 << 4) - 1);

        seq.toggle_all();
        assert_eq!(seq.count_ones(), 0);
        assert_eq!(seq.count_zeros(), 100);

        seq.set_bit(0);
        seq.set_bit(99);
        seq.toggle_all();
        assert_eq!(seq.count_ones(), 98);

        seq.clear_all();
        assert_eq!(seq.count_ones(), 0);
    }

    #[test]
    fn test_count_overlap() {
        let mut a = BitSeq::with_len(64, false).unwrap();
        let mut b = BitSeq::with_len(64, false).unwrap();
        a.set_range(4..12);
        b.set_range(6..16);
        assert_eq!(a.count_overlap(&b), 6);
    }

    #[test]
    fn test_push_pop() {
        let mut seq = BitSeq::new();
        seq.push(true);
        seq.push(false);
        seq.push(true);
        assert_eq!(seq.len(), 3);
        assert!(seq.get_bit(0) && !seq.get_bit(1) && seq.get_bit(2));

        assert_eq!(seq.pop(), Some(true));
        assert_eq!(seq.pop(), Some(false));
        assert_eq!(seq.pop(), Some(true));
        assert_eq!(seq.pop(), None);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_push_amortized_growth() {
        let mut seq = BitSeq::new();
        for i in 0..200 {
            seq.push(i % 3 == 0);
        }
        assert_eq!(seq.len(), 200);
        assert!(seq.capacity() >= 200);
        assert_eq!(seq.count_ones(), 67);
    }

    #[test]
    fn test_operators() {
        let a = BitSeq::from_value(0b1100, 8).unwrap();
        let b = BitSeq::from_value(0b1010, 8).unwrap();

        assert_eq!(&a & &b, 0b1000u64);
        assert_eq!(&a | &b, 0b1110u64);
        assert_eq!(&a ^ &b, 0b0110u64);
        assert_eq!(!&a, 0b1111_0011u64);
    }

    #[test]
    fn test_assign_operators() {
        let mut a = BitSeq::from_value(0b1100, 8).unwrap();
        let b = BitSeq::from_value(0b1010, 8).unwrap();
        a &= &b;
        assert_eq!(a, 0b1000u64);
        a |= &b;
        assert_eq!(a, 0b1010u64);
        a ^= &b;
        assert_eq!(a, 0u64);
    }

    #[test]
    fn test_assign_operators_capacity_mismatch() {
        // Same length, different capacity: slack words never participate.
        let mut a = BitSeq::with_len(40, true).unwrap();
        a.reserve(512).unwrap();
        let b = BitSeq::with_len(40, true).unwrap();
        a ^= &b;
        assert_eq!(a.count_ones(), 0);
        assert_eq!(a, BitSeq::with_len(40, false).unwrap());
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let mut a = BitSeq::with_len(33, false).unwrap();
        let mut b = BitSeq::with_len(33, false).unwrap();
        b.reserve(1024).unwrap();
        a.set_bit(32);
        b.set_bit(32);
        assert_eq!(a, b);
        b.clear_bit(32);
        assert_ne!(a, b);
        // Length participates even when all bits agree.
        assert_ne!(
            BitSeq::with_len(10, false).unwrap(),
            BitSeq::with_len(11, false).unwrap()
        );
    }

    #[test]
    fn test_pattern_interop() {
        let seq = BitSeq::from(0xDEAD_BEEF_0000_FFFFu64);
        assert_eq!(seq.len(), 64);
        assert_eq!(seq, 0xDEAD_BEEF_0000_FFFFu64);
        assert_ne!(seq, 0xDEAD_BEEF_0000_FFFEu64);

        // Shorter sequences compare as zero-extended patterns.
        let seq = BitSeq::from_value(0b101, 3).unwrap();
        assert_eq!(seq, 0b101u64);
        assert_ne!(seq, 0b1101u64);

        // Pattern bits that do not fit are discarded.
        let seq = BitSeq::from_value(0b1111_0001, 4).unwrap();
        assert_eq!(seq, 0b0001u64);
    }

    #[test]
    fn test_display_round_trip() {
        let mut seq = BitSeq::with_len(40, false).unwrap();
        seq.set_bit(0);
        seq.set_bit(33);
        seq.set_bit(39);
        let rendered = seq.to_string();
        assert_eq!(rendered.len(), 40);
        assert_eq!(&rendered[..7], "1000001");
        assert!(rendered.ends_with('1'));

        let parsed: BitSeq = rendered.parse().unwrap();
        assert_eq!(parsed, seq);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "0101x1".parse::<BitSeq>().unwrap_err();
        assert_eq!(
            err,
            BitSeqError::Parse {
                position: 4,
                found: 'x'
            }
        );
        assert_eq!("".parse::<BitSeq>().unwrap(), BitSeq::new());
    }

    #[test]
    fn test_from_bools_and_iter() {
        let seq = BitSeq::from(&[true, false, true, true][..]);
        assert_eq!(seq.len(), 4);
        assert_eq!(seq, 0b1101u64);

        let collected: BitSeq = (0..10).map(|i| i % 2 == 0).collect();
        assert_eq!(collected.count_ones(), 5);
    }

    #[test]
    fn test_shift_round_trip_zeroes_low_bits() {
        let mut seq = BitSeq::with_len(100, true).unwrap();
        let original = seq.clone();
        seq <<= 37;
        seq >>= 37;
        for i in 0..100 {
            assert_eq!(seq.get_bit(i), i >= 37 && original.get_bit(i), "bit {}", i);
        }
    }

    #[test]
    fn test_shift_clears_when_oversized() {
        let mut seq = BitSeq::with_len(50, true).unwrap();
        seq <<= 50;
        assert_eq!(seq.count_ones(), 0);
        let mut seq = BitSeq::with_len(50, true).unwrap();
        seq >>= 80;
        assert_eq!(seq.count_ones(), 0);
    }

    #[test]
    fn test_move_leaves_source_empty() {
        let mut seq = BitSeq::with_len(64, true).unwrap();
        let moved = std::mem::take(&mut seq);
        assert_eq!(moved.count_ones(), 64);
        assert!(seq.is_empty());
        assert_eq!(seq.capacity(), 0);
    }

    #[test]
    fn test_random_operations() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let mut seq = BitSeq::with_len(1024, false).unwrap();

        seq.random_set_num(&mut rng, 100);
        assert_eq!(seq.count_ones(), 100);

        seq.random_set_pct(&mut rng, 0.1);
        assert_eq!(seq.count_ones(), 102); // round(1024 * 0.1)
    }

    #[test]
    fn test_random_shuffle_preserves_count() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut seq = BitSeq::with_len(256, false).unwrap();
        seq.set_range(0..64);
        seq.random_shuffle(&mut rng);
        assert_eq!(seq.count_ones(), 64);
    }

    #[test]
    fn test_memory_usage() {
        let seq = BitSeq::with_len(1024, false).unwrap();
        assert!(seq.memory_usage() >= 128);
    }
}
