//! Hash primitives consumed by the graph core
//!
//! The core only relies on two capabilities: a stateful, index-keyed "fast"
//! mixing hash that produces one block, and a stateless "full" two-input
//! compression with a fixed output width.

use sha2::{Digest, Sha512};

use crate::error::PrimitiveError;
use crate::params::{FULL_HASH_LEN, MAX_FAST_BLOCK_LEN};

/// Stateful, index-keyed block mixer
pub trait FastHash {
    /// Width of one block in bytes
    fn block_len(&self) -> usize;

    /// Clear any running state
    fn reset_state(&mut self);

    /// Mix `left` and `right` under `index` into `out` (`block_len` bytes)
    fn mix(
        &mut self,
        index: u64,
        left: &[u8],
        right: &[u8],
        out: &mut [u8],
    ) -> Result<(), PrimitiveError>;
}

/// Fixed-width two-input compression
pub trait FullHash {
    /// Output width in bytes
    const OUTPUT_LEN: usize;

    /// Compress `a || b` into `out` (`OUTPUT_LEN` bytes)
    fn compress2(&self, a: &[u8], b: &[u8], out: &mut [u8]) -> Result<(), PrimitiveError>;
}

#[inline(always)]
fn check_output(expected: usize, out: &[u8]) -> Result<(), PrimitiveError> {
    if out.len() != expected {
        return Err(PrimitiveError::OutputLen {
            expected,
            actual: out.len(),
        });
    }
    Ok(())
}

/// SHA-512 as the full primitive
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha512Full;

impl FullHash for Sha512Full {
    const OUTPUT_LEN: usize = FULL_HASH_LEN;

    fn compress2(&self, a: &[u8], b: &[u8], out: &mut [u8]) -> Result<(), PrimitiveError> {
        check_output(Self::OUTPUT_LEN, out)?;
        let mut hasher = Sha512::new();
        hasher.update(a);
        hasher.update(b);
        out.copy_from_slice(&hasher.finalize());
        Ok(())
    }
}

/// BLAKE3 in extendable-output mode as the fast primitive
///
/// `mix` absorbs `le64(index) || left || right` into a freshly reset hasher
/// and squeezes exactly one block. No state carries from one mix to the
/// next, so every block is a pure function of its inputs and `reset_state`
/// only clears the reusable hasher.
#[derive(Clone, Debug)]
pub struct Blake3Fast {
    block_len: usize,
    hasher: blake3::Hasher,
}

impl Blake3Fast {
    /// Create a fast primitive producing `block_len`-byte blocks
    ///
    /// `block_len` must be a non-zero multiple of the full hash width so the
    /// block-expansion step can tile it.
    pub fn new(block_len: usize) -> Result<Self, PrimitiveError> {
        if block_len == 0 || block_len % FULL_HASH_LEN != 0 || block_len > MAX_FAST_BLOCK_LEN {
            return Err(PrimitiveError::UnsupportedBlockLen {
                len: block_len,
                multiple_of: FULL_HASH_LEN,
                max: MAX_FAST_BLOCK_LEN,
            });
        }
        Ok(Self {
            block_len,
            hasher: blake3::Hasher::new(),
        })
    }
}

impl Default for Blake3Fast {
    fn default() -> Self {
        Self {
            block_len: crate::params::DEFAULT_FAST_BLOCK_LEN,
            hasher: blake3::Hasher::new(),
        }
    }
}

impl FastHash for Blake3Fast {
    #[inline(always)]
    fn block_len(&self) -> usize {
        self.block_len
    }

    fn reset_state(&mut self) {
        self.hasher.reset();
    }

    #[inline(always)]
    fn mix(
        &mut self,
        index: u64,
        left: &[u8],
        right: &[u8],
        out: &mut [u8],
    ) -> Result<(), PrimitiveError> {
        check_output(self.block_len, out)?;
        self.hasher.reset();
        self.hasher.update(&index.to_le_bytes());
        self.hasher.update(left);
        self.hasher.update(right);
        self.hasher.finalize_xof().fill(out);
        Ok(())
    }
}
