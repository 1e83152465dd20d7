// Copyright 2025 Bilinear Labs - MIT License

//! Batch variants of the single-key tree operations: apply many writes in
//! one call, each succeeding or failing independently, with indices and
//! values validated for matching length up front.

use crate::error::MerkleError;
use crate::hash::H256;
use crate::proof::UpdateProof;
use crate::stores::store::Store;
use crate::tree::Tree;
use crate::types::Index;

/// A single write in a mixed batch built with [`batch_apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchTuple {
    Insert(Index, H256),
    Update(Index, H256),
    Upsert(Index, H256),
    Delete(Index),
}

fn check_lengths(indices: &[Index], values: &[H256]) -> Result<(), MerkleError> {
    if indices.len() != values.len() {
        return Err(MerkleError::LengthMismatch { indices: indices.len(), values: values.len() });
    }
    Ok(())
}

/// Applies `tree.insert` for each `(index, value)` pair in order. Each
/// tuple succeeds or fails on its own; a `KeyExists` for one index does not
/// prevent later tuples in the batch from being applied.
pub fn batch_insert<S: Store>(
    tree: &mut Tree<S>,
    indices: &[Index],
    values: &[H256],
) -> Result<Vec<Result<UpdateProof, MerkleError>>, MerkleError> {
    check_lengths(indices, values)?;
    Ok(indices.iter().zip(values.iter()).map(|(&index, &value)| tree.insert(index, value)).collect())
}

/// Applies `tree.update` for each `(index, value)` pair in order.
pub fn batch_update<S: Store>(
    tree: &mut Tree<S>,
    indices: &[Index],
    values: &[H256],
) -> Result<Vec<Result<UpdateProof, MerkleError>>, MerkleError> {
    check_lengths(indices, values)?;
    Ok(indices.iter().zip(values.iter()).map(|(&index, &value)| tree.update(index, value)).collect())
}

/// Applies `tree.upsert` for each `(index, value)` pair in order. Unlike
/// [`batch_insert`], this never fails on an already-occupied index.
pub fn batch_upsert<S: Store>(
    tree: &mut Tree<S>,
    indices: &[Index],
    values: &[H256],
) -> Result<Vec<Result<UpdateProof, MerkleError>>, MerkleError> {
    check_lengths(indices, values)?;
    Ok(indices.iter().zip(values.iter()).map(|(&index, &value)| tree.upsert(index, value)).collect())
}

/// Applies `tree.delete` for each index in order.
pub fn batch_delete<S: Store>(tree: &mut Tree<S>, indices: &[Index]) -> Vec<Result<UpdateProof, MerkleError>> {
    indices.iter().map(|&index| tree.delete(index)).collect()
}

/// Applies a sequence of mixed operations in order, one [`BatchTuple`] per
/// write. Useful when a single batch needs to insert some keys, update
/// others, and delete others in a specific interleaving.
pub fn batch_apply<S: Store>(tree: &mut Tree<S>, ops: &[BatchTuple]) -> Vec<Result<UpdateProof, MerkleError>> {
    ops.iter()
        .map(|op| match *op {
            BatchTuple::Insert(index, value) => tree.insert(index, value),
            BatchTuple::Update(index, value) => tree.update(index, value),
            BatchTuple::Upsert(index, value) => tree.upsert(index, value),
            BatchTuple::Delete(index) => tree.delete(index),
        })
        .collect()
}
