//! Reusable hasher over the default primitive pair
//!
//! Owns the memory buffer and both primitives so repeated evaluations avoid
//! re-allocating the `2 * 2^garlic` blocks.

use sha2::{Digest, Sha512};

use crate::error::GraphError;
use crate::graph;
use crate::params::FULL_HASH_LEN;
use crate::primitives::{Blake3Fast, FastHash, Sha512Full};
use crate::variant::Graph;

/// Graph evaluator with BLAKE3 as the fast and SHA-512 as the full primitive
pub struct GraphHasher {
    graph: Graph,
    fast: Blake3Fast,
    full: Sha512Full,
    /// Grown on demand, never shrunk
    memory: Vec<u8>,
}

impl GraphHasher {
    /// Create a hasher with 64-byte fast blocks
    ///
    /// No memory is allocated until the first call.
    pub fn new(graph: Graph) -> Self {
        Self::with_fast(graph, Blake3Fast::default())
    }

    pub fn with_fast(graph: Graph, fast: Blake3Fast) -> Self {
        Self {
            graph,
            fast,
            full: Sha512Full,
            memory: Vec::new(),
        }
    }

    pub fn graph(&self) -> Graph {
        self.graph
    }

    /// Bytes currently held for the memory buffer
    pub fn allocated(&self) -> usize {
        self.memory.len()
    }

    /// Evaluate the graph on a 64-byte input digest
    pub fn hash(
        &mut self,
        x: &[u8],
        lambda: u8,
        garlic: u8,
        salt: &[u8],
    ) -> Result<Vec<u8>, GraphError> {
        // Reject bad parameters before growing the buffer
        let required = graph::check_parameters::<_, Sha512Full>(
            &self.fast,
            x,
            lambda,
            garlic,
            self.graph.min_garlic(),
        )?
        .required;
        if self.memory.len() < required {
            let additional = required - self.memory.len();
            self.memory
                .try_reserve_exact(additional)
                .map_err(|_| GraphError::AllocationFailure { bytes: required })?;
            self.memory.resize(required, 0);
        }

        let mut out = vec![0u8; self.fast.block_len()];
        self.graph.process(
            &mut self.fast,
            &self.full,
            x,
            lambda,
            garlic,
            salt,
            &mut self.memory,
            &mut out,
        )?;
        Ok(out)
    }
}

/// SHA-512 of an arbitrary message, sized as the graph input
pub fn digest_input(message: &[u8]) -> [u8; FULL_HASH_LEN] {
    let mut x = [0u8; FULL_HASH_LEN];
    x.copy_from_slice(&Sha512::digest(message));
    x
}

/// One-shot evaluation
///
/// For repeated evaluations prefer a [`GraphHasher`], which keeps its memory.
pub fn hash(
    graph: Graph,
    x: &[u8],
    lambda: u8,
    garlic: u8,
    salt: &[u8],
) -> Result<Vec<u8>, GraphError> {
    GraphHasher::new(graph).hash(x, lambda, garlic, salt)
}
