//! Two-region view over the caller's memory
//!
//! Region A holds the previous round (blocks `0..c`), region B the round being
//! built (blocks `c..2c`). A round reads A and the tail of B, writes B, then
//! `promote` copies B over A.

pub(crate) struct BlockBuffer<'a> {
    previous: &'a mut [u8],
    current: &'a mut [u8],
    block_len: usize,
    blocks: usize,
}

impl<'a> BlockBuffer<'a> {
    /// Split exactly `2 * blocks * block_len` bytes of `memory` into the two regions
    ///
    /// The caller has already checked the length.
    pub(crate) fn new(memory: &'a mut [u8], blocks: usize, block_len: usize) -> Self {
        let half = blocks * block_len;
        let (previous, rest) = memory[..2 * half].split_at_mut(half);
        Self {
            previous,
            current: rest,
            block_len,
            blocks,
        }
    }

    #[inline(always)]
    fn range(&self, i: usize) -> core::ops::Range<usize> {
        i * self.block_len..(i + 1) * self.block_len
    }

    #[inline(always)]
    pub(crate) fn previous(&self, i: usize) -> &[u8] {
        &self.previous[self.range(i)]
    }

    #[inline(always)]
    pub(crate) fn previous_mut(&mut self, i: usize) -> &mut [u8] {
        let range = self.range(i);
        &mut self.previous[range]
    }

    #[inline(always)]
    pub(crate) fn current_mut(&mut self, i: usize) -> &mut [u8] {
        let range = self.range(i);
        &mut self.current[range]
    }

    /// Region A split at block `i`: `(A[..i], &mut A[i])`
    #[inline(always)]
    pub(crate) fn previous_split(&mut self, i: usize) -> (&[u8], &mut [u8]) {
        let (done, rest) = self.previous.split_at_mut(i * self.block_len);
        (done, &mut rest[..self.block_len])
    }

    /// Inputs and output of one chain link: `(B[i-1], A[j], &mut B[i])`
    #[inline(always)]
    pub(crate) fn link(&mut self, i: usize, j: usize) -> (&[u8], &[u8], &mut [u8]) {
        debug_assert!(i >= 1 && i < self.blocks && j < self.blocks);
        let (done, rest) = self.current.split_at_mut(i * self.block_len);
        let left = &done[(i - 1) * self.block_len..];
        let out = &mut rest[..self.block_len];
        let right = &self.previous[j * self.block_len..(j + 1) * self.block_len];
        (left, right, out)
    }

    /// Overwrite region A with region B
    pub(crate) fn promote(&mut self) {
        self.previous.copy_from_slice(self.current);
    }

    /// Zero region B
    pub(crate) fn clear_current(&mut self) {
        self.current.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_do_not_overlap() {
        let mut memory = vec![0u8; 2 * 4 * 8];
        let mut buffer = BlockBuffer::new(&mut memory, 4, 8);
        buffer.previous_mut(3).fill(0xAA);
        buffer.current_mut(0).fill(0xBB);

        assert_eq!(&memory[24..32], &[0xAA; 8]);
        assert_eq!(&memory[32..40], &[0xBB; 8]);
    }

    #[test]
    fn test_link_returns_neighbours() {
        let mut memory: Vec<u8> = (0..64).collect();
        let mut buffer = BlockBuffer::new(&mut memory, 4, 8);

        let (left, right, out) = buffer.link(2, 1);
        assert_eq!(left, &[40, 41, 42, 43, 44, 45, 46, 47]);
        assert_eq!(right, &[8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(out[0], 48);
    }

    #[test]
    fn test_promote_copies_current_over_previous() {
        let mut memory = vec![0u8; 32];
        memory[16..].fill(7);
        let mut buffer = BlockBuffer::new(&mut memory, 2, 8);
        buffer.promote();

        assert_eq!(buffer.previous(0), &[7; 8]);
        assert_eq!(buffer.previous(1), &[7; 8]);
    }

    #[test]
    fn test_oversized_memory_tail_untouched() {
        let mut memory = vec![0xEEu8; 40];
        let mut buffer = BlockBuffer::new(&mut memory, 2, 8);
        buffer.clear_current();
        buffer.promote();

        assert_eq!(&memory[..32], &[0u8; 32]);
        assert_eq!(&memory[32..], &[0xEE; 8]);
    }
}
