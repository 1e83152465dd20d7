// Copyright 2025 Bilinear Labs - MIT License

use crate::stores::store::StoreError;
use crate::types::{Depth, Index};

#[derive(Debug, thiserror::Error)]
pub enum MerkleError {
    #[error("invalid tree depth: {depth} (must be in 1..=256)")]
    InvalidTreeDepth { depth: u32 },

    #[error("index {index} out of range for depth {depth}")]
    OutOfRange { index: Index, depth: Depth },

    #[error("key already exists at index {index}")]
    KeyExists { index: Index },

    #[error("key not found at index {index}")]
    KeyNotFound { index: Index },

    #[error("proof failed to verify")]
    InvalidProof,

    #[error("batch indices length ({indices}) does not match values length ({values})")]
    LengthMismatch { indices: usize, values: usize },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid hex input: {0}")]
    HexDecode(String),
}
