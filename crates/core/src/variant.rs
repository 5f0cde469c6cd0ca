//! Graph variants
//!
//! Each known construction is a tag of [`Graph`]. The tag carries an immutable
//! [`VariantInfo`] and dispatches `process` statically to the shared phases.

use core::fmt;

use crate::buffer::BlockBuffer;
use crate::error::GraphError;
use crate::graph::{self, FirstSlot};
use crate::index::{phi, reverse};
use crate::params::*;
use crate::primitives::{FastHash, FullHash};

/// Self-description of a graph variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantInfo {
    /// Display name
    pub name: &'static str,
    /// Short code used by the registry
    pub short_code: &'static str,
    pub description: &'static str,
    pub default_lambda: u8,
    pub default_garlic: u8,
    pub min_garlic: u8,
    pub version_id: &'static [u8],
}

const GR3_PHI: VariantInfo = VariantInfo {
    name: "Gray-Reverse 3 Phi",
    short_code: "GR3-Phi",
    description: "As suggested by Ben Harris. Recommended for Lambda up to 4",
    default_lambda: DEFAULT_LAMBDA,
    default_garlic: DEFAULT_GARLIC,
    min_garlic: GR3_PHI_MIN_GARLIC,
    version_id: b"GR3-Phi",
};

const BRG: VariantInfo = VariantInfo {
    name: "Bit-Reversal Graph",
    short_code: "BRG",
    description: "Catena bit-reversal graph with data-independent memory access",
    default_lambda: DEFAULT_LAMBDA,
    default_garlic: DEFAULT_GARLIC,
    min_garlic: BRG_MIN_GARLIC,
    version_id: b"BRG",
};

/// Known graph constructions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Graph {
    /// Gray-Reverse 3 graph followed by a data-dependent pass
    Gr3Phi,
    /// Plain bit-reversal graph
    Brg,
}

impl Graph {
    /// Every built-in variant, in registration order
    pub const ALL: [Graph; 2] = [Graph::Gr3Phi, Graph::Brg];

    pub fn info(self) -> &'static VariantInfo {
        match self {
            Graph::Gr3Phi => &GR3_PHI,
            Graph::Brg => &BRG,
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn short_code(self) -> &'static str {
        self.info().short_code
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }

    pub fn default_lambda(self) -> u8 {
        self.info().default_lambda
    }

    pub fn default_garlic(self) -> u8 {
        self.info().default_garlic
    }

    pub fn min_garlic(self) -> u8 {
        self.info().min_garlic
    }

    pub fn version_id(self) -> &'static [u8] {
        self.info().version_id
    }

    /// Bytes the caller must provide to `process` for this garlic
    pub fn memory_requirement<F: FastHash>(self, garlic: u8, fast: &F) -> Result<usize, GraphError> {
        graph::memory_requirement(garlic, fast.block_len())
    }

    /// Evaluate the graph
    ///
    /// `x` is the input digest (`H::OUTPUT_LEN` bytes), `memory` must hold at
    /// least [`Graph::memory_requirement`] bytes and `out` receives one fast
    /// block. The fast primitive is reset at the documented points; no state
    /// from before the call influences the result.
    ///
    /// `salt` is accepted for interface parity and not mixed here: salt
    /// material is expected to be absorbed into `x` by the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn process<F: FastHash, H: FullHash>(
        self,
        fast: &mut F,
        full: &H,
        x: &[u8],
        lambda: u8,
        garlic: u8,
        _salt: &[u8],
        memory: &mut [u8],
        out: &mut [u8],
    ) -> Result<(), GraphError> {
        let geometry = graph::validate::<F, H>(fast, x, lambda, garlic, self.min_garlic(), memory, out)?;
        tracing::debug!(
            variant = self.short_code(),
            lambda,
            garlic,
            memory = geometry.required,
            "evaluating graph"
        );

        let mut buffer = BlockBuffer::new(memory, geometry.blocks, geometry.block_len);
        graph::seed(fast, full, x, &mut buffer, &geometry)?;

        match self {
            Graph::Gr3Phi => {
                graph::build_rounds(fast, full, &mut buffer, &geometry, lambda, FirstSlot::Previous, phi)?;
                graph::data_dependent_pass(fast, &mut buffer, &geometry)?;
            }
            Graph::Brg => {
                graph::build_rounds(fast, full, &mut buffer, &geometry, lambda, FirstSlot::Current, reverse)?;
            }
        }

        // reverse(c - 1, garlic) == c - 1: the last block is the graph's sink
        out.copy_from_slice(buffer.previous(geometry.blocks - 1));
        Ok(())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gr3_phi_descriptor() {
        let graph = Graph::Gr3Phi;
        assert_eq!(graph.name(), "Gray-Reverse 3 Phi");
        assert_eq!(graph.short_code(), "GR3-Phi");
        assert_eq!(graph.default_lambda(), DEFAULT_LAMBDA);
        assert_eq!(graph.default_garlic(), DEFAULT_GARLIC);
        assert_eq!(graph.min_garlic(), GR3_PHI_MIN_GARLIC);
        assert_eq!(graph.version_id(), b"GR3-Phi");
    }

    #[test]
    fn test_display_uses_short_code() {
        assert_eq!(Graph::Brg.to_string(), "BRG");
        assert_eq!(format!("{}", Graph::Gr3Phi), "GR3-Phi");
    }

    #[test]
    fn test_defaults_respect_minimum() {
        for graph in Graph::ALL {
            assert!(graph.default_garlic() >= graph.min_garlic());
            assert!(graph.default_lambda() >= 1);
        }
    }
}
