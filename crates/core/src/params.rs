//! Catena graph parameters
//!
//! Default cost parameters and primitive widths shared by every graph variant.

/// Default time cost (rounds of graph construction)
pub const DEFAULT_LAMBDA: u8 = 2;

/// Default space cost: the buffer holds `2 * 2^garlic` blocks
pub const DEFAULT_GARLIC: u8 = 21;

/// Smallest garlic accepted by Gray-Reverse 3 Phi
pub const GR3_PHI_MIN_GARLIC: u8 = 2;

/// Smallest garlic accepted by the bit-reversal graph
pub const BRG_MIN_GARLIC: u8 = 1;

/// Output width of the full primitive (SHA-512)
pub const FULL_HASH_LEN: usize = 64;

/// Block width of the default fast primitive
pub const DEFAULT_FAST_BLOCK_LEN: usize = 64;

/// Largest fast block width; H_INIT counts `2 * F / FULL_HASH_LEN` in one byte
pub const MAX_FAST_BLOCK_LEN: usize = 128 * FULL_HASH_LEN;

/// Bytes of a block interpreted as the word for data-dependent addressing
pub const ADDRESS_WORD_LEN: usize = 8;

/// Crate format version
pub const VERSION: u8 = 1;
