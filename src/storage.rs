// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pocketbook", "pocketbook"));

/// Keys under which the six collections are persisted, each holding one
/// JSON-serialized array.
pub const ACCOUNTS_KEY: &str = "accounts";
pub const STREAMS_KEY: &str = "streams";
pub const CATEGORIES_KEY: &str = "categories";
pub const RECORDS_KEY: &str = "records";
pub const BUDGETS_KEY: &str = "budgets";
pub const SAVINGS_KEY: &str = "savings";

pub const COLLECTION_KEYS: [&str; 6] = [
    ACCOUNTS_KEY,
    STREAMS_KEY,
    CATEGORIES_KEY,
    RECORDS_KEY,
    BUDGETS_KEY,
    SAVINGS_KEY,
];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("key-value backend failure: {0}")]
    Backend(#[from] rusqlite::Error),
    #[error("could not determine platform-specific data dir")]
    NoDataDir,
    #[error("i/o failure at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Durable key-value snapshot store. The domain store is the only writer.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

pub fn data_path() -> Result<PathBuf, StorageError> {
    let proj =
        directories::ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(StorageError::NoDataDir)?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).map_err(|source| StorageError::Io {
        path: data_dir.to_path_buf(),
        source,
    })?;
    Ok(data_dir.join("pocketbook.sqlite"))
}

/// SQLite-backed key-value store: one `kv` table, one row per collection.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(data_path()?)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(SqliteStorage { conn })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(SqliteStorage { conn })
    }

    fn init_schema(conn: &Connection) -> Result<(), StorageError> {
        conn.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS kv(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
        )?;
        Ok(())
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let v = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![key])?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    map: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.map.remove(key);
        Ok(())
    }
}
