//! Generic key/value meta store for content items.
//!
//! # Responsibility
//! - Read raw meta values in single or multi-value mode.
//! - Normalize every write through the registered field sanitizers.
//!
//! # Invariants
//! - Single-value reads return the oldest row for a key.
//! - `update_meta` leaves exactly one row for the key.

use super::RepoResult;
use crate::extension::fields::MetaFieldRegistry;
use crate::model::content::ContentId;
use crate::model::meta_value::MetaValue;
use log::debug;
use rusqlite::{params, Connection};

/// Store interface consumed by geo resolution and editing paths.
pub trait MetaStore {
    /// Returns the first value stored under `key`, if any.
    fn get_single(&self, item: ContentId, key: &str) -> RepoResult<Option<MetaValue>>;
    /// Returns every value stored under `key`, oldest first.
    fn get_all(&self, item: ContentId, key: &str) -> RepoResult<Vec<MetaValue>>;
    /// Appends one value under `key`.
    fn add_meta(&self, item: ContentId, key: &str, value: &MetaValue) -> RepoResult<()>;
    /// Replaces all values under `key` with one value.
    fn update_meta(&self, item: ContentId, key: &str, value: &MetaValue) -> RepoResult<()>;
    /// Removes all values under `key`, returning the number removed.
    fn delete_meta(&self, item: ContentId, key: &str) -> RepoResult<usize>;
}

/// SQLite-backed meta store.
pub struct SqliteMetaStore<'conn> {
    conn: &'conn Connection,
    fields: MetaFieldRegistry,
}

impl<'conn> SqliteMetaStore<'conn> {
    /// Store without write hooks; values are written as given.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_fields(conn, MetaFieldRegistry::new())
    }

    /// Store that sanitizes writes to every key declared in `fields`.
    pub fn with_fields(conn: &'conn Connection, fields: MetaFieldRegistry) -> Self {
        Self { conn, fields }
    }

    pub fn fields(&self) -> &MetaFieldRegistry {
        &self.fields
    }
}

impl MetaStore for SqliteMetaStore<'_> {
    fn get_single(&self, item: ContentId, key: &str) -> RepoResult<Option<MetaValue>> {
        let mut stmt = self.conn.prepare(
            "SELECT meta_value FROM item_meta
             WHERE item_uuid = ?1 AND meta_key = ?2
             ORDER BY meta_id ASC
             LIMIT 1;",
        )?;
        let mut rows = stmt.query(params![item.to_string(), key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn get_all(&self, item: ContentId, key: &str) -> RepoResult<Vec<MetaValue>> {
        let mut stmt = self.conn.prepare(
            "SELECT meta_value FROM item_meta
             WHERE item_uuid = ?1 AND meta_key = ?2
             ORDER BY meta_id ASC;",
        )?;
        let values = stmt
            .query_map(params![item.to_string(), key], |row| row.get(0))?
            .collect::<Result<Vec<MetaValue>, _>>()?;
        Ok(values)
    }

    fn add_meta(&self, item: ContentId, key: &str, value: &MetaValue) -> RepoResult<()> {
        let value = self.fields.sanitize_for_write(key, value);
        self.conn.execute(
            "INSERT INTO item_meta (item_uuid, meta_key, meta_value) VALUES (?1, ?2, ?3);",
            params![item.to_string(), key, value],
        )?;
        debug!("event=meta_write module=repo status=ok op=add key={key} item_id={item}");
        Ok(())
    }

    fn update_meta(&self, item: ContentId, key: &str, value: &MetaValue) -> RepoResult<()> {
        let value = self.fields.sanitize_for_write(key, value);
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM item_meta WHERE item_uuid = ?1 AND meta_key = ?2;",
            params![item.to_string(), key],
        )?;
        tx.execute(
            "INSERT INTO item_meta (item_uuid, meta_key, meta_value) VALUES (?1, ?2, ?3);",
            params![item.to_string(), key, value],
        )?;
        tx.commit()?;
        debug!("event=meta_write module=repo status=ok op=update key={key} item_id={item}");
        Ok(())
    }

    fn delete_meta(&self, item: ContentId, key: &str) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM item_meta WHERE item_uuid = ?1 AND meta_key = ?2;",
            params![item.to_string(), key],
        )?;
        debug!(
            "event=meta_write module=repo status=ok op=delete key={key} item_id={item} removed={removed}"
        );
        Ok(removed)
    }
}
