// Copyright 2025 Bilinear Labs - MIT License

//! RocksDB store implementation.

#[cfg(feature = "rocksdb_store")]
use super::store::{Store, StoreError};
#[cfg(feature = "rocksdb_store")]
use crate::hash::H256;

#[cfg(feature = "rocksdb_store")]
pub struct RocksDbStore {
    db: rocksdb::DB,
}

#[cfg(feature = "rocksdb_store")]
impl RocksDbStore {
    fn db_error<E: std::fmt::Display>(err: E) -> StoreError {
        StoreError::IoFailure(err.to_string())
    }

    pub fn new(path: &str) -> Self {
        use rocksdb::{Options, DB};
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path).expect("failed to open rocksdb");

        Self { db }
    }
}

#[cfg(feature = "rocksdb_store")]
impl Store for RocksDbStore {
    fn get(&self, key: &H256) -> Result<Option<Vec<u8>>, StoreError> {
        self.db.get(key.as_bytes()).map_err(Self::db_error)
    }

    fn put(&mut self, key: H256, value: Vec<u8>) -> Result<(), StoreError> {
        self.db.put(key.as_bytes(), value).map_err(Self::db_error)
    }

    fn delete(&mut self, key: &H256) -> Result<(), StoreError> {
        self.db.delete(key.as_bytes()).map_err(Self::db_error)
    }
}
