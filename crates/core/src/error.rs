//! Error types for graph evaluation and the hash primitives

use thiserror::Error;

/// Failures surfaced by a hash primitive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("unsupported block length {len} (must be a non-zero multiple of {multiple_of}, at most {max})")]
    UnsupportedBlockLen {
        len: usize,
        multiple_of: usize,
        max: usize,
    },

    #[error("output length mismatch: expected {expected} bytes, got {actual}")]
    OutputLen { expected: usize, actual: usize },
}

/// Failures of a single `process` call or a registry lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("memory buffer too small: {required} bytes required, {provided} provided")]
    UndersizedBuffer { required: usize, provided: usize },

    #[error("failed to allocate {bytes} bytes of scratch memory")]
    AllocationFailure { bytes: usize },

    #[error("hash primitive failure: {0}")]
    Primitive(#[from] PrimitiveError),

    #[error("unknown graph variant: {0}")]
    UnknownVariant(String),

    #[error("graph variant already registered: {0}")]
    DuplicateVariant(&'static str),
}

impl GraphError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GraphError::InvalidParameter(msg.into())
    }
}
