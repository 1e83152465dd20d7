// Copyright 2025 Bilinear Labs - MIT License

//! The sparse Merkle tree: a keyed, content-addressed authenticated map of
//! fixed `Depth`, built on a pluggable [`Store`].

use crate::error::MerkleError;
use crate::h256;
use crate::hash::{leaf_hash, node_hash, H256};
use crate::proof::{Proof, UpdateProof};
use crate::stores::store::Store;
use crate::types::{bit_at_level, index_out_of_range, Depth, Enables, Index};

/// An inner node record: the 64-byte concatenation of its two children.
fn encode_internal(left: &H256, right: &H256) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(left.as_ref());
    buf.extend_from_slice(right.as_ref());
    buf
}

fn decode_internal(bytes: &[u8]) -> (H256, H256) {
    assert_eq!(bytes.len(), 64, "corrupted internal node record");
    (H256::from_slice(&bytes[..32]), H256::from_slice(&bytes[32..]))
}

/// A leaf record: `value(32) || index_be(32)`. The index is kept alongside
/// the value so that, if ever needed, a leaf record can be inspected
/// without re-deriving it from a descent.
fn encode_leaf(value: &H256, index: Index) -> Vec<u8> {
    let mut buf = vec![0u8; 64];
    buf[..32].copy_from_slice(value.as_ref());
    index.to_big_endian(&mut buf[32..]);
    buf
}

fn decode_leaf(bytes: &[u8]) -> (H256, Index) {
    assert_eq!(bytes.len(), 64, "corrupted leaf record");
    (H256::from_slice(&bytes[..32]), Index::from_big_endian(&bytes[32..]))
}

/// A sparse Merkle tree of fixed `depth`, backed by a content-addressed
/// [`Store`]. Keys into the store are node hashes; `H256::ZERO` (the empty
/// subtree) is never written.
pub struct Tree<S: Store> {
    depth: Depth,
    root: H256,
    store: S,
}

impl<S: Store> Tree<S> {
    /// Creates an empty tree of the given `depth` (must be in `1..=256`).
    pub fn new(depth: Depth, store: S) -> Result<Self, MerkleError> {
        if depth == 0 || depth > 256 {
            return Err(MerkleError::InvalidTreeDepth { depth: depth as u32 });
        }
        Ok(Self { depth, root: H256::ZERO, store })
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn root(&self) -> H256 {
        self.root
    }

    fn check_index(&self, index: Index) -> Result<(), MerkleError> {
        if index_out_of_range(index, self.depth) {
            return Err(MerkleError::OutOfRange { index, depth: self.depth });
        }
        Ok(())
    }

    fn internal_get(&self, key: &H256) -> Result<Option<(H256, H256)>, MerkleError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(decode_internal(&bytes))),
            None => Ok(None),
        }
    }

    fn internal_put(&mut self, key: H256, left: H256, right: H256) -> Result<(), MerkleError> {
        self.store.put(key, encode_internal(&left, &right))?;
        Ok(())
    }

    fn internal_delete(&mut self, key: &H256) -> Result<(), MerkleError> {
        self.store.delete(key)?;
        Ok(())
    }

    fn leaf_get(&self, key: &H256) -> Result<Option<(H256, Index)>, MerkleError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(decode_leaf(&bytes))),
            None => Ok(None),
        }
    }

    fn leaf_put(&mut self, key: H256, value: H256, index: Index) -> Result<(), MerkleError> {
        self.store.put(key, encode_leaf(&value, index))?;
        Ok(())
    }

    fn leaf_delete(&mut self, key: &H256) -> Result<(), MerkleError> {
        self.store.delete(key)?;
        Ok(())
    }

    /// Returns the two children of `node`, or `(ZERO, ZERO)` for an empty
    /// subtree; the zero-absorption rule means a zero node is never
    /// actually stored.
    fn children_or_zero(&self, node: &H256) -> Result<(H256, H256), MerkleError> {
        if node.is_zero() {
            return Ok((H256::ZERO, H256::ZERO));
        }
        Ok(self.internal_get(node)?.unwrap_or((H256::ZERO, H256::ZERO)))
    }

    /// `true` iff `index` currently holds a leaf record, including a
    /// tombstone left by [`Tree::delete`]. Callers that need to tell a
    /// tombstone apart from a live value should inspect [`Proof::value`]
    /// from [`Tree::get`] instead.
    pub fn exists(&self, index: Index) -> Result<bool, MerkleError> {
        self.check_index(index)?;
        let mut current = self.root;
        for level in 0..self.depth {
            let (left, right) = self.children_or_zero(&current)?;
            current = if bit_at_level(index, self.depth, level) == 0 { left } else { right };
        }
        Ok(self.leaf_get(&current)?.is_some())
    }

    /// Walks the tree for `index`, returning its membership proof. Collects
    /// only nonzero siblings, ordered deepest-to-shallowest, with `enables`
    /// recording which levels they belong to.
    pub fn get(&self, index: Index) -> Result<Proof, MerkleError> {
        self.check_index(index)?;

        let mut current = self.root;
        let mut enables = Enables::zero();
        let mut siblings = Vec::new();

        for level in 0..self.depth {
            let (left, right) = self.children_or_zero(&current)?;
            let bit = bit_at_level(index, self.depth, level);
            let (on_path, sibling) = if bit == 0 { (left, right) } else { (right, left) };

            if !sibling.is_zero() {
                let level_from_leaf = self.depth - 1 - level;
                enables |= Enables::one() << level_from_leaf as usize;
                siblings.push(sibling);
            }
            current = on_path;
        }
        siblings.reverse();

        let (exists, leaf, value) = match self.leaf_get(&current)? {
            Some((value, _index)) => (true, current, value),
            None => (false, H256::ZERO, H256::ZERO),
        };

        Ok(Proof { exists, leaf, value, index, enables, siblings })
    }

    /// The shared descend-then-rebuild primitive behind `insert`, `update`
    /// and `delete`: writes `value` at `index` unconditionally (no
    /// existence precondition beyond range checking) and returns a proof of
    /// the state before the write.
    pub fn upsert(&mut self, index: Index, value: H256) -> Result<UpdateProof, MerkleError> {
        self.check_index(index)?;

        let old = self.get(index)?;
        let new_leaf = leaf_hash(index, &value);

        // siblings[level] is the sibling encountered descending through
        // `level`, collected on the way down so the path can be rebuilt
        // bottom-up afterwards.
        let mut current = self.root;
        let mut siblings = vec![H256::ZERO; self.depth as usize];
        for level in 0..self.depth {
            let (left, right) = self.children_or_zero(&current)?;
            let bit = bit_at_level(index, self.depth, level);
            let (on_path, sibling) = if bit == 0 { (left, right) } else { (right, left) };
            siblings[level as usize] = sibling;

            if !current.is_zero() {
                self.internal_delete(&current)?;
            }
            current = on_path;
        }
        if !current.is_zero() {
            self.leaf_delete(&current)?;
        }

        self.leaf_put(new_leaf, value, index)?;

        let mut cursor = new_leaf;
        for level in (0..self.depth).rev() {
            let bit = bit_at_level(index, self.depth, level);
            let sibling = siblings[level as usize];
            let (left, right) = if bit == 0 { (cursor, sibling) } else { (sibling, cursor) };
            let parent = node_hash(&left, &right);
            if !parent.is_zero() {
                self.internal_put(parent, left, right)?;
            }
            cursor = parent;
        }
        self.root = cursor;

        Ok(UpdateProof { old, new_leaf })
    }

    /// Inserts a fresh key. Fails with [`MerkleError::KeyExists`] if `index`
    /// already holds a leaf record (including a tombstone).
    pub fn insert(&mut self, index: Index, value: H256) -> Result<UpdateProof, MerkleError> {
        self.check_index(index)?;
        if self.exists(index)? {
            return Err(MerkleError::KeyExists { index });
        }
        self.upsert(index, value)
    }

    /// Updates an existing key. Fails with [`MerkleError::KeyNotFound`] if
    /// `index` holds no leaf record.
    pub fn update(&mut self, index: Index, value: H256) -> Result<UpdateProof, MerkleError> {
        self.check_index(index)?;
        if !self.exists(index)? {
            return Err(MerkleError::KeyNotFound { index });
        }
        self.upsert(index, value)
    }

    /// Tombstones an existing key: writes `leaf_hash(index, ZERO)` rather
    /// than purging the slot, so the deletion itself remains provable.
    /// Fails with [`MerkleError::KeyNotFound`] if `index` holds no leaf
    /// record.
    pub fn delete(&mut self, index: Index) -> Result<UpdateProof, MerkleError> {
        self.check_index(index)?;
        if !self.exists(index)? {
            return Err(MerkleError::KeyNotFound { index });
        }
        self.upsert(index, H256::ZERO)
    }
}
