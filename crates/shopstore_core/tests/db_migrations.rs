use rusqlite::Connection;
use shopstore_core::db::migrations::latest_version;
use shopstore_core::db::{open_db, open_db_in_memory, DbError};

const SHOP_TABLES: &[&str] = &[
    "shop_discount",
    "shop_order",
    "shop_order_line_item",
    "shop_product",
    "shop_category",
    "shop_media",
];

#[test]
fn in_memory_database_has_every_shop_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in SHOP_TABLES {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn reopening_a_file_database_keeps_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.sqlite3");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO shop_product (id, status, created_at, updated_at) VALUES ('p-1', 'draft', '2024-01-01 00:00:00', '2024-01-01 00:00:00');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let rows: i64 = second
        .query_row("SELECT COUNT(*) FROM shop_product;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn new_rows_default_to_not_deleted_sentinel() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO shop_category (id, status, created_at, updated_at) VALUES ('c-1', 'draft', '2024-01-01 00:00:00', '2024-01-01 00:00:00');",
        [],
    )
    .unwrap();

    let (marker, metas): (String, String) = conn
        .query_row(
            "SELECT soft_deleted_at, metas FROM shop_category WHERE id = 'c-1';",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(marker, "9999-12-31 23:59:59");
    assert_eq!(metas, "{}");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
