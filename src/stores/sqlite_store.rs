// Copyright 2025 Bilinear Labs - MIT License

//! SQLite store implementation.

#[cfg(feature = "sqlite_store")]
use super::store::{Store, StoreError};
#[cfg(feature = "sqlite_store")]
use crate::hash::H256;
#[cfg(feature = "sqlite_store")]
use rusqlite::{params, Connection, OptionalExtension};

#[cfg(feature = "sqlite_store")]
pub struct SqliteStore {
    conn: Connection,
}

#[cfg(feature = "sqlite_store")]
impl SqliteStore {
    fn db_error<E: std::fmt::Display>(err: E) -> StoreError {
        StoreError::IoFailure(err.to_string())
    }

    // Use ":memory:" for in-memory database.
    pub fn new(file_path: &str) -> Self {
        let conn = Connection::open(file_path).expect("failed to open sqlite DB");

        conn.execute_batch("PRAGMA journal_mode = WAL;\nPRAGMA synchronous = NORMAL;")
            .expect("failed to set WAL mode and synchronous pragma");

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS nodes (
                 key   BLOB PRIMARY KEY CHECK(length(key) = 32),
                 value BLOB NOT NULL CHECK(length(value) = 64)
             );",
        )
        .expect("failed to create tables");

        Self { conn }
    }
}

#[cfg(feature = "sqlite_store")]
impl Store for SqliteStore {
    fn get(&self, key: &H256) -> Result<Option<Vec<u8>>, StoreError> {
        self.conn
            .query_row(
                "SELECT value FROM nodes WHERE key = ?1",
                params![key.as_bytes().as_slice()],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()
            .map_err(Self::db_error)
    }

    fn put(&mut self, key: H256, value: Vec<u8>) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO nodes (key, value) VALUES (?1, ?2)",
                params![key.as_bytes().as_slice(), value],
            )
            .map_err(Self::db_error)?;
        Ok(())
    }

    fn delete(&mut self, key: &H256) -> Result<(), StoreError> {
        self.conn
            .execute(
                "DELETE FROM nodes WHERE key = ?1",
                params![key.as_bytes().as_slice()],
            )
            .map_err(Self::db_error)?;
        Ok(())
    }
}
