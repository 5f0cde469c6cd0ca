//! Graph index functions
//!
//! Bit-reversal permutation, the Gray-Reverse 3 predecessor function and the
//! data-dependent address extractor. All three must match other Catena
//! implementations bit for bit: a single differing index changes every digest.

/// Bit-reversal of the low `n` bits of `x`
///
/// Reverses the whole word (bytes, then nibbles, pairs and single bits) and
/// shifts the reversed low `n` bits back down. `n` must be in `1..=64`.
#[inline(always)]
pub fn reverse(x: u64, n: u8) -> u64 {
    debug_assert!((1..=64).contains(&n));
    let mut x = x.swap_bytes();
    x = ((x & 0x0f0f_0f0f_0f0f_0f0f) << 4) | ((x & 0xf0f0_f0f0_f0f0_f0f0) >> 4);
    x = ((x & 0x3333_3333_3333_3333) << 2) | ((x & 0xcccc_cccc_cccc_cccc) >> 2);
    x = ((x & 0x5555_5555_5555_5555) << 1) | ((x & 0xaaaa_aaaa_aaaa_aaaa) >> 1);
    x >> (64 - u32::from(n))
}

/// Predecessor of block `i` in the Gray-Reverse 3 graph
///
/// `reverse(i, g)` XOR its complement truncated to `g` bits and narrowed by a
/// further `g / 3` bits. The narrowing uses the integer quotient.
#[inline(always)]
pub fn phi(i: u64, g: u8) -> u64 {
    debug_assert!((1..=64).contains(&g));
    let g = u32::from(g);
    let rev = reverse(i, g as u8);
    let mut inv = !rev;
    inv <<= 64 - g;
    inv >>= (64 - g) + g / 3;
    rev ^ inv
}

/// Top `n` bits of `word`, used as the next read address in phase 2
#[inline(always)]
pub fn data_address(word: u64, n: u8) -> u64 {
    debug_assert!((1..=64).contains(&n));
    word >> (64 - u32::from(n))
}

/// Interpret the first 8 bytes of a block as a little-endian word
#[inline(always)]
pub(crate) fn block_word(block: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&block[..8]);
    u64::from_le_bytes(word)
}
