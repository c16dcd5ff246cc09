//! Error types for the bitseq crate.
//!
//! A single error enum covers every fallible operation, using the
//! `thiserror` crate for ergonomic error handling. Contract violations
//! (reversed ranges, out-of-bounds positions) are not errors: they are
//! programming mistakes checked by `debug_assert!` and documented panics.

use thiserror::Error;

/// The error type for bit sequence operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitSeqError {
    /// A requested size or capacity exceeds the implementation ceiling.
    ///
    /// Oversized requests always fail; they are never silently truncated
    /// or rounded down.
    #[error("capacity overflow: requested {requested} bits exceeds the maximum of {max}")]
    CapacityOverflow {
        /// The number of bits requested
        requested: usize,
        /// The implementation ceiling ([`crate::MAX_BITS`])
        max: usize,
    },

    /// A textual bit string contained a character other than `'0'` or `'1'`.
    #[error("invalid bit character {found:?} at position {position}")]
    Parse {
        /// Character offset of the offending character
        position: usize,
        /// The character found there
        found: char,
    },
}

/// A specialized `Result` type for bit sequence operations.
pub type Result<T> = std::result::Result<T, BitSeqError>;
