//! Content item repository.
//!
//! # Invariants
//! - Listing order is deterministic: newest first, then by uuid.
//! - Deleting an item removes its meta rows via `ON DELETE CASCADE`.

use super::{RepoError, RepoResult};
use crate::model::content::{ContentId, ContentItem, ContentKind};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const ITEM_SELECT_SQL: &str = "SELECT uuid, kind, title FROM content_items";

/// Query options for listing content items.
#[derive(Debug, Clone, Default)]
pub struct ContentListQuery {
    pub kind: Option<ContentKind>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for content items.
pub trait ContentRepository {
    fn create_item(&self, item: &ContentItem) -> RepoResult<ContentId>;
    fn update_item(&self, item: &ContentItem) -> RepoResult<()>;
    fn get_item(&self, id: ContentId) -> RepoResult<Option<ContentItem>>;
    fn list_items(&self, query: &ContentListQuery) -> RepoResult<Vec<ContentItem>>;
    fn delete_item(&self, id: ContentId) -> RepoResult<()>;
}

/// SQLite-backed content repository.
pub struct SqliteContentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContentRepository for SqliteContentRepository<'_> {
    fn create_item(&self, item: &ContentItem) -> RepoResult<ContentId> {
        self.conn.execute(
            "INSERT INTO content_items (uuid, kind, title) VALUES (?1, ?2, ?3);",
            params![item.id.to_string(), item.kind.as_str(), item.title.as_str()],
        )?;
        Ok(item.id)
    }

    fn update_item(&self, item: &ContentItem) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE content_items
             SET
                kind = ?1,
                title = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?3;",
            params![item.kind.as_str(), item.title.as_str(), item.id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(item.id));
        }
        Ok(())
    }

    fn get_item(&self, id: ContentId) -> RepoResult<Option<ContentItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_item_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_items(&self, query: &ContentListQuery) -> RepoResult<Vec<ContentItem>> {
        let mut sql = format!("{ITEM_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(kind) = query.kind {
            sql.push_str(" AND kind = ?");
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC, uuid ASC");

        match query.limit {
            Some(limit) => {
                sql.push_str(" LIMIT ? OFFSET ?");
                bind_values.push(Value::Integer(i64::from(limit)));
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
            None if query.offset > 0 => {
                sql.push_str(" LIMIT -1 OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
            None => {}
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn delete_item(&self, id: ContentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM content_items WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<ContentItem> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in content_items.uuid"
        ))
    })?;

    let kind_text: String = row.get("kind")?;
    let kind = kind_text.parse::<ContentKind>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid content kind `{kind_text}` in content_items.kind"
        ))
    })?;

    Ok(ContentItem {
        id,
        kind,
        title: row.get("title")?,
    })
}
