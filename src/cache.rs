// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::CacheError;

/// Whole-value key/blob store. No partial updates, no expiry.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;
    fn clear(&self, key: &str) -> Result<(), CacheError>;
}

#[derive(Debug, Clone)]
pub struct CacheEntryInfo {
    pub key: String,
    pub bytes: usize,
    pub updated_at: String,
}

/// Cache slots stored in the `cache_entries` table.
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    pub fn new(conn: Connection) -> Result<Self, CacheError> {
        init_schema(&conn)?;
        Ok(SqliteCache {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn entries(&self) -> Result<Vec<CacheEntryInfo>, CacheError> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT key, length(value), updated_at FROM cache_entries ORDER BY key")?;
        let rows = stmt.query_map([], |r| {
            Ok(CacheEntryInfo {
                key: r.get(0)?,
                bytes: r.get::<_, i64>(1)?.max(0) as usize,
                updated_at: r.get(2)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

pub(crate) fn init_schema(conn: &Connection) -> Result<(), CacheError> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS cache_entries(
        key TEXT PRIMARY KEY,
        value BLOB NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

impl CacheStore for SqliteCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let v = self
            .conn()
            .query_row(
                "SELECT value FROM cache_entries WHERE key=?1",
                params![key],
                |r| r.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.conn().execute(
            "INSERT INTO cache_entries(key, value, updated_at) VALUES(?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), CacheError> {
        self.conn()
            .execute("DELETE FROM cache_entries WHERE key=?1", params![key])?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCache {
    slots: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), CacheError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.remove(key);
        Ok(())
    }
}
