// Copyright 2025 Bilinear Labs - MIT License

/*!
A sparse Merkle tree implementation in Rust with configurable storage
backends: a keyed, content-addressed authenticated map supporting insert,
update, tombstone-delete and compact membership proofs. This
implementation features:

* Fixed depth, chosen at tree construction, up to 256 levels.
* Sparse: unwritten subtrees are represented implicitly as
  `H256::ZERO` and never touch the store.
* Keccak-256 hashing throughout, with domain-separated leaf hashes and a
  zero-absorption rule (`node_hash(ZERO, ZERO) == ZERO`) that keeps empty
  subtrees free to represent.
* Compact proofs: an `enables` bitmask records which levels carry a
  materialized sibling, so proofs carry only nonzero siblings and are
  bit-exact across any conforming implementation.

Add `rs-sparse-merkle-tree` as a dependency to your Rust `Cargo.toml`.

```toml
[dependencies]
rs-sparse-merkle-tree = { git = "https://github.com/bilinearlabs/rs-sparse-merkle-tree.git" }
```

You can create a tree, insert a value, and verify its membership proof as
follows. This creates a depth-16 tree using an in-memory store.

```rust
use rs_sparse_merkle_tree::h256;
use rs_sparse_merkle_tree::hash::H256;
use rs_sparse_merkle_tree::proof::verify;
use rs_sparse_merkle_tree::stores::MemoryStore;
use rs_sparse_merkle_tree::tree::Tree;
use rs_sparse_merkle_tree::types::Index;

fn main() {
    let mut tree = Tree::new(16, MemoryStore::new()).unwrap();
    tree.insert(Index::from(5u64), h256!("0x01")).unwrap();

    let proof = tree.get(Index::from(5u64)).unwrap();
    assert!(verify(
        tree.root(),
        tree.depth(),
        proof.leaf,
        proof.index,
        proof.enables,
        &proof.siblings
    ));
}
```

You can customize the tree's storage backend by choosing a different
[`stores::Store`] implementation. This tree persists its nodes in a
key-value sled store.

```rust,ignore
use rs_sparse_merkle_tree::stores::SledStore;
use rs_sparse_merkle_tree::tree::Tree;

fn main() {
    let mut tree = Tree::new(32, SledStore::new("sled.db", true)).unwrap();
}
```

Note: this example requires the `sled_store` feature to be enabled.

Keys that are not naturally 256-bit indices, arbitrary byte strings, for
example, can go through [`kv::KvTree`], which hashes the key with
Keccak-256 to derive its index and fixes the tree depth at 256.
*/

pub mod batch;
pub mod error;
pub mod hash;
pub mod json;
pub mod kv;
pub mod proof;
pub mod tree;
pub mod types;

pub mod stores {
    pub mod store;

    #[cfg(feature = "memory_store")]
    mod memory_store;
    #[cfg(feature = "memory_store")]
    pub use memory_store::MemoryStore;

    #[cfg(feature = "sled_store")]
    mod sled_store;
    #[cfg(feature = "sled_store")]
    pub use sled_store::SledStore;

    #[cfg(feature = "sqlite_store")]
    mod sqlite_store;
    #[cfg(feature = "sqlite_store")]
    pub use sqlite_store::SqliteStore;

    #[cfg(feature = "rocksdb_store")]
    mod rocksdb_store;
    #[cfg(feature = "rocksdb_store")]
    pub use rocksdb_store::RocksDbStore;

    pub use store::{Store, StoreError};
}

pub use error::MerkleError;
pub use hash::H256;
pub use kv::KvTree;
pub use proof::{Proof, UpdateProof};
pub use stores::Store;
pub use tree::Tree;
