//! Two-phase buffer filling
//!
//! Phase 0 seeds region A from the input digest. Phase 1 runs `lambda` rounds
//! of the content-independent graph, each round writing region B and
//! promoting it over region A. Gray-Reverse 3 Phi then makes one
//! data-dependent pass over region A, reading at addresses taken from the
//! block it has just written.

use crate::buffer::BlockBuffer;
use crate::error::GraphError;
use crate::index::{block_word, data_address};
use crate::params::ADDRESS_WORD_LEN;
use crate::primitives::{FastHash, FullHash};

/// Bytes needed for `2 * 2^garlic` blocks of `block_len` bytes
///
/// Pure arithmetic, no hashing. Sizes that do not fit in `usize` are rejected.
pub fn memory_requirement(garlic: u8, block_len: usize) -> Result<usize, GraphError> {
    1usize
        .checked_shl(u32::from(garlic))
        .and_then(|blocks| blocks.checked_mul(2))
        .and_then(|blocks| blocks.checked_mul(block_len))
        .ok_or_else(|| {
            GraphError::invalid(format!(
                "garlic {garlic} with {block_len}-byte blocks overflows the address space"
            ))
        })
}

/// Where H_First writes the first block of a round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FirstSlot {
    /// Overwrite `A[0]`; the first link then reads the untouched `B[0]`
    Previous,
    /// Write `B[0]`, the head of the new chain
    Current,
}

/// Validated shape of one call
#[derive(Clone, Copy, Debug)]
pub(crate) struct Geometry {
    pub(crate) garlic: u8,
    pub(crate) blocks: usize,
    pub(crate) block_len: usize,
    pub(crate) required: usize,
}

/// Check the cost parameters, the input and the primitive widths
///
/// Needs no memory, so owners of a buffer can run it before allocating.
pub(crate) fn check_parameters<F: FastHash, H: FullHash>(
    fast: &F,
    x: &[u8],
    lambda: u8,
    garlic: u8,
    min_garlic: u8,
) -> Result<Geometry, GraphError> {
    if lambda == 0 {
        return Err(GraphError::invalid("lambda must be at least 1"));
    }
    if garlic < min_garlic {
        return Err(GraphError::invalid(format!(
            "garlic {garlic} is below the minimum of {min_garlic}"
        )));
    }
    if garlic >= 64 {
        return Err(GraphError::invalid(format!("garlic {garlic} exceeds 63")));
    }

    let block_len = fast.block_len();
    let required = memory_requirement(garlic, block_len)?;

    if x.len() != H::OUTPUT_LEN {
        return Err(GraphError::invalid(format!(
            "input must be {} bytes, got {}",
            H::OUTPUT_LEN,
            x.len()
        )));
    }
    if block_len < ADDRESS_WORD_LEN || block_len % H::OUTPUT_LEN != 0 {
        return Err(GraphError::invalid(format!(
            "fast block length {block_len} must be a multiple of {} and at least {ADDRESS_WORD_LEN}",
            H::OUTPUT_LEN
        )));
    }
    if 2 * (block_len / H::OUTPUT_LEN) > 256 {
        return Err(GraphError::invalid(format!(
            "fast block length {block_len} needs more than 256 expansion counters"
        )));
    }

    Ok(Geometry {
        garlic,
        blocks: 1usize << garlic,
        block_len,
        required,
    })
}

/// Check every parameter before the buffer is touched
pub(crate) fn validate<F: FastHash, H: FullHash>(
    fast: &F,
    x: &[u8],
    lambda: u8,
    garlic: u8,
    min_garlic: u8,
    buffer: &[u8],
    out: &[u8],
) -> Result<Geometry, GraphError> {
    let geometry = check_parameters::<F, H>(fast, x, lambda, garlic, min_garlic)?;

    if out.len() != geometry.block_len {
        return Err(GraphError::invalid(format!(
            "output must be {} bytes, got {}",
            geometry.block_len,
            out.len()
        )));
    }
    if buffer.len() < geometry.required {
        return Err(GraphError::UndersizedBuffer {
            required: geometry.required,
            provided: buffer.len(),
        });
    }
    Ok(geometry)
}

/// Zero-initialised scratch memory released when dropped
fn scratch(len: usize) -> Result<Vec<u8>, GraphError> {
    let mut block = Vec::new();
    block
        .try_reserve_exact(len)
        .map_err(|_| GraphError::AllocationFailure { bytes: len })?;
    block.resize(len, 0);
    Ok(block)
}

/// Compress two fast-width blocks to the full width, then expand back
///
/// `out[k]` is `compress2([k], compress2(prev, carried))` for every
/// full-width slice `k` of the output.
pub(crate) fn h_first<F: FastHash, H: FullHash>(
    fast: &mut F,
    full: &H,
    prev: &[u8],
    carried: &[u8],
    out: &mut [u8],
) -> Result<(), GraphError> {
    fast.reset_state();
    let mut compressed = scratch(H::OUTPUT_LEN)?;
    full.compress2(prev, carried, &mut compressed)?;

    for (counter, chunk) in out.chunks_exact_mut(H::OUTPUT_LEN).enumerate() {
        full.compress2(&[counter as u8], &compressed, chunk)?;
    }
    Ok(())
}

/// Phase 0: expand `x` into `v_-1 || v_-2` and fill region A sequentially
///
/// Region B is zeroed so every block the graph can read has a defined value.
pub(crate) fn seed<F: FastHash, H: FullHash>(
    fast: &mut F,
    full: &H,
    x: &[u8],
    buffer: &mut BlockBuffer<'_>,
    geometry: &Geometry,
) -> Result<(), GraphError> {
    let f = geometry.block_len;
    let mut init = scratch(2 * f)?;
    for (counter, chunk) in init.chunks_exact_mut(H::OUTPUT_LEN).enumerate() {
        full.compress2(&[counter as u8], x, chunk)?;
    }
    let (v_m1, v_m2) = init.split_at(f);

    fast.reset_state();
    fast.mix(0, v_m1, v_m2, buffer.previous_mut(0))?;

    if geometry.blocks > 1 {
        let (done, out) = buffer.previous_split(1);
        fast.mix(1, done, v_m1, out)?;
    }
    for i in 2..geometry.blocks {
        let (done, out) = buffer.previous_split(i);
        let (older, newer) = done[(i - 2) * f..].split_at(f);
        fast.mix(i as u64, newer, older, out)?;
    }

    buffer.clear_current();
    tracing::trace!(blocks = geometry.blocks, "region A seeded");
    Ok(())
}

/// Phase 1: `lambda` rounds over the graph defined by `predecessor`
pub(crate) fn build_rounds<F, H, P>(
    fast: &mut F,
    full: &H,
    buffer: &mut BlockBuffer<'_>,
    geometry: &Geometry,
    lambda: u8,
    first_slot: FirstSlot,
    predecessor: P,
) -> Result<(), GraphError>
where
    F: FastHash,
    H: FullHash,
    P: Fn(u64, u8) -> u64,
{
    let c = geometry.blocks;
    let g = geometry.garlic;
    let mut first = scratch(geometry.block_len)?;

    for round in 0..lambda {
        h_first(fast, full, buffer.previous(c - 1), buffer.previous(0), &mut first)?;
        match first_slot {
            FirstSlot::Previous => buffer.previous_mut(0).copy_from_slice(&first),
            FirstSlot::Current => buffer.current_mut(0).copy_from_slice(&first),
        }
        fast.reset_state();

        for i in 1..c {
            let j = predecessor(i as u64, g) as usize;
            let (left, right, out) = buffer.link(i, j);
            fast.mix(i as u64, left, right, out)?;
        }

        buffer.promote();
        tracing::trace!(round, "graph round complete");
    }
    Ok(())
}

/// Phase 2: one data-dependent pass over region A
pub(crate) fn data_dependent_pass<F: FastHash>(
    fast: &mut F,
    buffer: &mut BlockBuffer<'_>,
    geometry: &Geometry,
) -> Result<(), GraphError> {
    let c = geometry.blocks;
    let g = geometry.garlic;
    let mut next = scratch(geometry.block_len)?;

    let addr = data_address(block_word(buffer.previous(c - 1)), g) as usize;
    fast.mix(0, buffer.previous(0), buffer.previous(addr), &mut next)?;
    buffer.previous_mut(0).copy_from_slice(&next);

    for i in 1..c {
        let addr = data_address(block_word(buffer.previous(i - 1)), g) as usize;
        fast.mix(i as u64, buffer.previous(addr), buffer.previous(i - 1), &mut next)?;
        buffer.previous_mut(i).copy_from_slice(&next);
    }

    tracing::trace!("data-dependent pass complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Blake3Fast, Sha512Full};

    #[test]
    fn test_memory_requirement_formula() {
        assert_eq!(memory_requirement(0, 64).unwrap(), 128);
        assert_eq!(memory_requirement(10, 64).unwrap(), 2 * 1024 * 64);
        assert_eq!(memory_requirement(21, 128).unwrap(), 2 * (1 << 21) * 128);
    }

    #[test]
    fn test_memory_requirement_overflow() {
        assert!(matches!(
            memory_requirement(63, 64),
            Err(GraphError::InvalidParameter(_))
        ));
        assert!(matches!(
            memory_requirement(64, 1),
            Err(GraphError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_h_first_expands_to_block_width() {
        let mut fast = Blake3Fast::new(192).unwrap();
        let prev = [1u8; 192];
        let carried = [2u8; 192];
        let mut out = [0u8; 192];
        h_first(&mut fast, &Sha512Full, &prev, &carried, &mut out).unwrap();

        let mut compressed = [0u8; 64];
        Sha512Full.compress2(&prev, &carried, &mut compressed).unwrap();
        for k in 0..3u8 {
            let mut expected = [0u8; 64];
            Sha512Full.compress2(&[k], &compressed, &mut expected).unwrap();
            assert_eq!(&out[k as usize * 64..(k as usize + 1) * 64], &expected[..]);
        }
    }

    #[test]
    fn test_validate_order_rejects_before_buffer_use() {
        let fast = Blake3Fast::default();
        let x = [0u8; 64];
        let out = [0u8; 64];

        // Invalid lambda wins over an empty buffer
        assert!(matches!(
            validate::<_, Sha512Full>(&fast, &x, 0, 4, 2, &[], &out),
            Err(GraphError::InvalidParameter(_))
        ));
        assert!(matches!(
            validate::<_, Sha512Full>(&fast, &x, 1, 4, 2, &[], &out),
            Err(GraphError::UndersizedBuffer {
                required: 2048,
                provided: 0
            })
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_input_and_output_len() {
        let fast = Blake3Fast::default();
        let memory = vec![0u8; 2048];

        assert!(matches!(
            validate::<_, Sha512Full>(&fast, &[0u8; 32], 1, 4, 2, &memory, &[0u8; 64]),
            Err(GraphError::InvalidParameter(_))
        ));
        assert!(matches!(
            validate::<_, Sha512Full>(&fast, &[0u8; 64], 1, 4, 2, &memory, &[0u8; 65]),
            Err(GraphError::InvalidParameter(_))
        ));
    }
}
