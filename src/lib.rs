//! Bitseq - Word-Packed Bit Sequences with Bulk Range Algorithms
//!
//! Bitseq is a dynamically-sized bit sequence (one logical bit per element,
//! 32 elements packed per word) together with a library of bulk range
//! algorithms that operate efficiently across word boundaries: copy, fill,
//! transform, equal, flip, search, rotate, shift, and lexicographic
//! next/previous permutation.
//!
//! # Key Characteristics
//!
//! - Packed `Vec<u32>` storage, 32× denser than a byte per bool
//! - Word-at-a-time bulk operations with explicit boundary masking
//! - Arbitrary (non-word-aligned) ranges and mismatched operand alignments
//! - A random-access bit cursor ([`BitPos`]) and an explicit single-bit
//!   proxy ([`BitRefMut`]) instead of unrepresentable packed references
//!
//! # Architecture
//!
//! Three layers, leaves first:
//!
//! - **[`BitSeq`]**: the owning container - storage growth and shrink,
//!   element access, operators, textual rendering
//! - **[`BitPos`] / [`BitRefMut`]**: cursor arithmetic over (word, offset)
//!   pairs and masked single-bit read-modify-write
//! - **[`range`]**: the bulk algorithm layer, generic over the word type
//!   via [`BitWord`]; algorithms never own storage, only borrow it
//!
//! Every bulk operation observes one contract: the result equals applying
//! the operation bit by bit in iteration order. Boundary words are updated
//! through masked read-modify-writes; interior words are overwritten
//! outright.
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use bitseq::BitSeq;
//!
//! let mut seq = BitSeq::with_len(1024, false).unwrap();
//! seq.set_bit(10);
//! seq.set_bit(20);
//! seq.set_bit(30);
//!
//! assert_eq!(seq.count_ones(), 3);
//! assert_eq!(seq.ones().collect::<Vec<_>>(), vec![10, 20, 30]);
//!
//! // Whole-range bitwise combination
//! let mut mask = BitSeq::with_len(1024, false).unwrap();
//! mask.set_range(20..40);
//! seq &= &mask;
//! assert_eq!(seq.ones().collect::<Vec<_>>(), vec![20, 30]);
//! ```
//!
//! ## Misaligned bulk copy
//!
//! ```
//! use bitseq::BitSeq;
//!
//! let mut src = BitSeq::with_len(65, false).unwrap();
//! src.set_range(7..40);
//!
//! let mut dst = BitSeq::with_len(128, false).unwrap();
//! dst.copy_from(25, &src, 7..40); // offset 7 -> offset 25, re-aligned
//! assert!(dst.eq_range(25, &src, 7..40));
//! ```
//!
//! ## Permutation walking
//!
//! ```
//! use bitseq::BitSeq;
//!
//! // 0 0 1 in iteration order; two more arrangements follow.
//! let mut seq = BitSeq::from_value(0b100, 3).unwrap();
//! assert!(seq.next_permutation(0..3));
//! assert!(seq.next_permutation(0..3));
//! assert!(!seq.next_permutation(0..3)); // back to the ascending start
//! assert_eq!(seq, 0b100u64);
//! ```
//!
//! # Safety
//!
//! The crate is entirely safe Rust. Contract checks (`debug_assert!`) on
//! hot paths cost nothing in release builds; reallocation can never leave a
//! dangling cursor because views borrow the sequence.

// Module declarations
pub mod error;
pub mod iter;
pub mod pos;
pub mod range;
pub mod seq;
pub mod word;

// Re-exports for convenient access
pub use error::{BitSeqError, Result};
pub use iter::{Bits, Ones};
pub use pos::{BitPos, BitRefMut};
pub use seq::{BitSeq, Word, BITS_PER_WORD, MAX_BITS};
pub use word::BitWord;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "bitseq";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
