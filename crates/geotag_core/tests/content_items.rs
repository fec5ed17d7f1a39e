use geotag_core::db::open_db_in_memory;
use geotag_core::{
    ContentItem, ContentKind, ContentListQuery, ContentRepository, MetaStore, MetaValue,
    RepoError, SqliteContentRepository, SqliteMetaStore,
};
use std::collections::HashSet;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);

    let item = ContentItem::new(ContentKind::Post, "Lake Harriet loop");
    let id = repo.create_item(&item).unwrap();

    assert_eq!(repo.get_item(id).unwrap(), Some(item));
}

#[test]
fn get_missing_item_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);
    let item = ContentItem::new(ContentKind::Page, "never stored");
    assert_eq!(repo.get_item(item.id).unwrap(), None);
}

#[test]
fn update_existing_item() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);

    let mut item = ContentItem::new(ContentKind::Post, "draft");
    repo.create_item(&item).unwrap();

    item.kind = ContentKind::Page;
    item.title = "About".to_string();
    repo.update_item(&item).unwrap();

    assert_eq!(repo.get_item(item.id).unwrap(), Some(item));
}

#[test]
fn update_and_delete_missing_item_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);

    let item = ContentItem::new(ContentKind::Post, "missing");
    let err = repo.update_item(&item).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == item.id));
    let err = repo.delete_item(item.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == item.id));
}

#[test]
fn list_filters_by_kind_and_paginates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);

    let posts: Vec<ContentItem> = (0..3)
        .map(|n| ContentItem::new(ContentKind::Post, format!("post {n}")))
        .collect();
    for post in &posts {
        repo.create_item(post).unwrap();
    }
    repo.create_item(&ContentItem::new(ContentKind::Page, "about"))
        .unwrap();

    let all = repo.list_items(&ContentListQuery::default()).unwrap();
    assert_eq!(all.len(), 4);

    let only_posts = repo
        .list_items(&ContentListQuery {
            kind: Some(ContentKind::Post),
            ..ContentListQuery::default()
        })
        .unwrap();
    let listed: HashSet<_> = only_posts.iter().map(|item| item.id).collect();
    let expected: HashSet<_> = posts.iter().map(|item| item.id).collect();
    assert_eq!(listed, expected);

    let first_page = repo
        .list_items(&ContentListQuery {
            limit: Some(2),
            ..ContentListQuery::default()
        })
        .unwrap();
    let second_page = repo
        .list_items(&ContentListQuery {
            limit: Some(2),
            offset: 2,
            ..ContentListQuery::default()
        })
        .unwrap();
    assert_eq!(first_page.len(), 2);
    assert_eq!(second_page.len(), 2);
    assert!(first_page.iter().all(|item| !second_page.contains(item)));
}

#[test]
fn deleting_item_removes_its_meta_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);
    let store = SqliteMetaStore::new(&conn);

    let item = ContentItem::new(ContentKind::Post, "gone soon");
    repo.create_item(&item).unwrap();
    store
        .add_meta(item.id, "geo_address", &MetaValue::from("Oslo"))
        .unwrap();

    repo.delete_item(item.id).unwrap();

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM item_meta;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test]
fn invalid_persisted_kind_is_reported() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    let item = ContentItem::new(ContentKind::Post, "odd");
    conn.execute(
        "INSERT INTO content_items (uuid, kind, title) VALUES (?1, 'gallery', 'odd');",
        [item.id.to_string()],
    )
    .unwrap();

    let repo = SqliteContentRepository::new(&conn);
    let err = repo.get_item(item.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("gallery")));
}
