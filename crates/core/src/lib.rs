//! # Catena Graph Core
//!
//! The memory-hard function at the heart of a Catena-style password
//! scrambler. Evaluation cost is dominated by filling and re-reading a buffer
//! of `2 * 2^garlic` blocks along a fixed graph, which makes parallel or
//! memory-reduced attacks expensive.
//!
//! ## Graph Variants
//!
//! - **GR3-Phi** (Gray-Reverse 3 Phi): `lambda` rounds over the Gray-Reverse 3
//!   graph, then one data-dependent pass whose read addresses come from the
//!   block just written
//! - **BRG** (Bit-Reversal Graph): `lambda` rounds over the plain bit-reversal
//!   graph, data-independent memory access only
//!
//! ## Memory Layout
//!
//! ```text
//! memory = A[0] .. A[c-1] || B[0] .. B[c-1]      c = 2^garlic blocks each
//!          previous round    round being built
//! ```
//!
//! Each round writes region B from region A and then copies B over A.
//!
//! ## Example
//!
//! ```rust
//! use catena_graph_core::{Blake3Fast, Graph, Registry, Sha512Full, digest_input};
//!
//! let graph = Registry::with_defaults().create("GR3-Phi").unwrap();
//! let mut fast = Blake3Fast::default();
//!
//! // Caller-owned memory, sized up front
//! let mut memory = vec![0u8; graph.memory_requirement(10, &fast).unwrap()];
//! let mut out = [0u8; 64];
//!
//! let x = digest_input(b"password and salt, already absorbed");
//! graph
//!     .process(&mut fast, &Sha512Full, &x, 2, 10, &[], &mut memory, &mut out)
//!     .unwrap();
//! ```
//!
//! For repeated evaluations, [`GraphHasher`] owns and reuses the memory.

mod buffer;
mod error;
mod graph;
mod hasher;
mod index;
mod params;
mod primitives;
mod registry;
mod variant;

#[cfg(feature = "ffi")]
mod ffi;

pub use error::{GraphError, PrimitiveError};
pub use graph::memory_requirement;
pub use hasher::{GraphHasher, digest_input, hash};
pub use index::{data_address, phi, reverse};
pub use params::*;
pub use primitives::{Blake3Fast, FastHash, FullHash, Sha512Full};
pub use registry::Registry;
pub use variant::{Graph, VariantInfo};

#[cfg(feature = "ffi")]
pub use ffi::*;
