// Copyright 2025 Bilinear Labs - MIT License

//! Simple in-memory store implementation.

use super::store::{Store, StoreError};
use crate::hash::H256;
use std::collections::HashMap;

/// Simple in-memory store implementation using a `HashMap`.
#[derive(Default)]
pub struct MemoryStore {
    map: HashMap<H256, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &H256) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.map.get(key).cloned())
    }

    fn put(&mut self, key: H256, value: Vec<u8>) -> Result<(), StoreError> {
        self.map.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &H256) -> Result<(), StoreError> {
        self.map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_put_delete() {
        let mut store = MemoryStore::new();
        let key = H256::random();
        assert_eq!(store.get(&key).unwrap(), None);

        store.put(key, vec![1, 2, 3]).unwrap();
        assert_eq!(store.get(&key).unwrap(), Some(vec![1, 2, 3]));

        store.delete(&key).unwrap();
        assert_eq!(store.get(&key).unwrap(), None);

        // Deleting an absent key is a no-op, not an error.
        store.delete(&key).unwrap();
    }
}
