// Copyright 2025 Bilinear Labs - MIT License

//! Membership proofs and the standalone verifier that checks one without
//! access to a [`Tree`](crate::tree::Tree) or its [`Store`](crate::stores::store::Store).

use crate::error::MerkleError;
use crate::hash::{node_hash, H256};
use crate::types::{bit_at_level, index_out_of_range, popcount, Depth, Enables, Index};

/// A compact membership (or non-membership) proof for one index.
///
/// `siblings` omits every sibling that is `H256::ZERO`; `enables` is a
/// bitmask recording which of the `depth` levels contributed a sibling to
/// `siblings`, deepest level first. This is what makes the proof bit-exact
/// and size-proportional to the number of materialized siblings rather than
/// the tree's depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    /// `false` means `index` holds no leaf record at all (never written).
    /// A tombstoned key still reports `exists: true` with `value: ZERO`.
    pub exists: bool,
    /// The leaf hash at `index`, or `H256::ZERO` if `exists` is `false`.
    pub leaf: H256,
    /// The stored value at `index`, or `H256::ZERO` if `exists` is `false`.
    pub value: H256,
    pub index: Index,
    pub enables: Enables,
    pub siblings: Vec<H256>,
}

/// The result of a state-changing operation: the proof of what was at
/// `index` immediately before the write, plus the new leaf hash that
/// replaced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateProof {
    pub old: Proof,
    pub new_leaf: H256,
}

/// Recomputes the root implied by a proof, without touching any store.
///
/// Fails with [`MerkleError::InvalidProof`] if `siblings` and `enables`
/// disagree on how many siblings are materialized, or if more siblings are
/// supplied than the tree has levels.
pub fn compute_root(
    depth: Depth,
    leaf: H256,
    index: Index,
    enables: Enables,
    siblings: &[H256],
) -> Result<H256, MerkleError> {
    if index_out_of_range(index, depth) {
        return Err(MerkleError::OutOfRange { index, depth });
    }
    if siblings.len() as u16 > depth {
        return Err(MerkleError::InvalidProof);
    }
    if popcount(enables) as usize != siblings.len() {
        return Err(MerkleError::InvalidProof);
    }

    // enables[k] tells whether the level `k` positions above the leaf
    // contributed a sibling; siblings are consumed in that same
    // deepest-to-shallowest order they were collected in.
    let mut cursor = leaf;
    let mut next_sibling = 0;
    for level_from_leaf in 0..depth {
        let level = depth - 1 - level_from_leaf;
        let sibling = if enables.bit(level_from_leaf as usize) {
            let s = siblings[next_sibling];
            next_sibling += 1;
            s
        } else {
            H256::ZERO
        };

        let bit = bit_at_level(index, depth, level);
        cursor = if bit == 0 { node_hash(&cursor, &sibling) } else { node_hash(&sibling, &cursor) };
    }

    Ok(cursor)
}

/// `true` iff the proof recomputes to exactly `root`.
pub fn verify(root: H256, depth: Depth, leaf: H256, index: Index, enables: Enables, siblings: &[H256]) -> bool {
    matches!(compute_root(depth, leaf, index, enables, siblings), Ok(r) if r == root)
}
