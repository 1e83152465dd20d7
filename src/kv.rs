// Copyright 2025 Bilinear Labs - MIT License

//! A convenience adapter over [`Tree`] for callers with arbitrary byte-slice
//! keys rather than pre-hashed 256-bit indices: keys are mapped to an
//! `Index` by hashing with Keccak-256, and the tree is fixed at depth 256 so
//! every key is addressable.

use crate::error::MerkleError;
use crate::hash::H256;
use crate::proof::{Proof, UpdateProof};
use crate::stores::store::Store;
use crate::tree::Tree;
use crate::types::{Depth, Index};
use tiny_keccak::{Hasher, Keccak};

/// The fixed depth of a [`KvTree`]: large enough that `kv_index` collisions
/// are cryptographically negligible.
pub const KV_DEPTH: Depth = 256;

/// Maps an arbitrary byte-slice key to its tree index: the big-endian
/// integer interpretation of `Keccak256(key)`.
pub fn kv_index(key: &[u8]) -> Index {
    let mut hasher = Keccak::v256();
    hasher.update(key);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    Index::from_big_endian(&out)
}

/// A keyed map over byte-slice keys, backed by a depth-256 [`Tree`].
pub struct KvTree<S: Store> {
    inner: Tree<S>,
}

impl<S: Store> KvTree<S> {
    pub fn new(store: S) -> Self {
        Self { inner: Tree::new(KV_DEPTH, store).expect("depth 256 is always a valid tree depth") }
    }

    pub fn root(&self) -> H256 {
        self.inner.root()
    }

    pub fn exists(&self, key: &[u8]) -> Result<bool, MerkleError> {
        self.inner.exists(kv_index(key))
    }

    pub fn get(&self, key: &[u8]) -> Result<Proof, MerkleError> {
        self.inner.get(kv_index(key))
    }

    pub fn insert(&mut self, key: &[u8], value: H256) -> Result<UpdateProof, MerkleError> {
        self.inner.insert(kv_index(key), value)
    }

    pub fn update(&mut self, key: &[u8], value: H256) -> Result<UpdateProof, MerkleError> {
        self.inner.update(kv_index(key), value)
    }

    pub fn upsert(&mut self, key: &[u8], value: H256) -> Result<UpdateProof, MerkleError> {
        self.inner.upsert(kv_index(key), value)
    }

    pub fn delete(&mut self, key: &[u8]) -> Result<UpdateProof, MerkleError> {
        self.inner.delete(kv_index(key))
    }

    /// Exposes the underlying index-keyed tree, for callers that need
    /// lower-level access (e.g. a raw [`Proof`] keyed by `Index` rather
    /// than the original byte key).
    pub fn inner(&self) -> &Tree<S> {
        &self.inner
    }
}
