// Copyright 2025 Bilinear Labs - MIT License

//! Sled store implementation.

#[cfg(feature = "sled_store")]
use super::store::{Store, StoreError};
#[cfg(feature = "sled_store")]
use crate::hash::H256;
#[cfg(feature = "sled_store")]
use sled::Db;

#[cfg(feature = "sled_store")]
pub struct SledStore {
    db: Db,
}

#[cfg(feature = "sled_store")]
impl SledStore {
    fn db_error<E: std::fmt::Display>(err: E) -> StoreError {
        StoreError::IoFailure(err.to_string())
    }

    // TODO: Maybe return result
    pub fn new(file_path: &str, temporary: bool) -> Self {
        // Stuff that can be tunned, unused by now:
        // - mode (small vs fast)
        // - compression
        // - cache capacity
        let db = sled::Config::new()
            .path(file_path)
            .temporary(temporary)
            .open()
            .expect("failed to open sled DB");

        Self { db }
    }
}

#[cfg(feature = "sled_store")]
impl Store for SledStore {
    fn get(&self, key: &H256) -> Result<Option<Vec<u8>>, StoreError> {
        match self.db.get(key.as_bytes()).map_err(Self::db_error)? {
            None => Ok(None),
            Some(ivec) => Ok(Some(ivec.to_vec())),
        }
    }

    fn put(&mut self, key: H256, value: Vec<u8>) -> Result<(), StoreError> {
        self.db.insert(key.as_bytes(), value).map_err(Self::db_error)?;
        Ok(())
    }

    fn delete(&mut self, key: &H256) -> Result<(), StoreError> {
        self.db.remove(key.as_bytes()).map_err(Self::db_error)?;
        Ok(())
    }
}
