//! Catena Graph Library
//!
//! Memory-hard graph evaluation for Catena-style password scramblers.
//!
//! # Overview
//!
//! A graph variant fills a buffer of `2 * 2^garlic` blocks along a fixed
//! dependency graph for `lambda` rounds. Gray-Reverse 3 Phi then adds a
//! data-dependent pass. Memory cost grows with `garlic`, time cost with `lambda`.
//!
//! # Features
//!
//! - **Caller-Owned Memory**: size the buffer with `memory_requirement`, then `process`
//! - **Variant Registry**: select a graph by short code (`GR3-Phi`, `BRG`)
//! - **Concurrent Benchmarking**: independent evaluations on separate threads
//!
//! # Example
//!
//! ```rust
//! use catena_graph::algorithm::{digest_input, hash, Graph};
//!
//! let x = digest_input(b"password || salt");
//! let result = hash(Graph::Gr3Phi, &x, 2, 10, &[]).unwrap();
//! assert_eq!(result.len(), 64);
//! ```

// Re-export the core algorithm
pub use catena_graph_core as algorithm;

pub mod benchmark;

// Convenience re-exports
pub use algorithm::{hash, Graph, GraphError, GraphHasher, Registry};
