// Copyright 2025 Bilinear Labs - MIT License

//! Store module contains the trait definition and common error type used by
//! the store backends.

use crate::hash::H256;

/// Errors raised by a [`Store`] backend. `NotFound` is meaningful to the
/// store only (an absent key is an empty subtree to the tree above it,
/// never surfaced past a `get`); `IoFailure` is a genuine backend failure
/// and is propagated unchanged through [`crate::error::MerkleError`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("key not found")]
    NotFound,
    #[error("store io failure: {0}")]
    IoFailure(String),
}

/// A generic, content-addressed key-value store keyed by 32-byte hash.
///
/// The tree maintains two disjoint logical mappings under this one
/// namespace: internal nodes (hash of a node -> its `[left, right]`
/// children, 64 bytes) and leaves (hash of a leaf -> its value and index,
/// 64 bytes). The store itself is unaware of this split; it just moves
/// bytes.
pub trait Store {
    /// Returns the bytes stored under `key`, or `None` if absent.
    fn get(&self, key: &H256) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: H256, value: Vec<u8>) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is a no-op, not an error: the
    /// tree's descent step unconditionally deletes every internal node it
    /// visits, including ones that were never written because they hashed
    /// to zero.
    fn delete(&mut self, key: &H256) -> Result<(), StoreError>;
}
