use rusqlite::Connection;
use taskdesk_core::db::schema::TABLES;
use taskdesk_core::db::DbError;
use taskdesk_core::{RepoError, SqliteStore, StoreConfig, User, UserRepository, UserRole};

#[test]
fn open_creates_all_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    SqliteStore::open(StoreConfig::new(&path)).unwrap();

    let conn = Connection::open(&path).unwrap();
    for table in TABLES {
        assert_table_exists(&conn, table);
    }
    assert_eq!(table_count(&conn), 3);
}

#[test]
fn reopening_store_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    let first = SqliteStore::open(StoreConfig::new(&path)).unwrap();
    let mut user = User::new("ann", "ann@example.com", UserRole::Admin);
    let id = first.create_user(&mut user).unwrap();
    drop(first);

    let second = SqliteStore::open(StoreConfig::new(&path)).unwrap();
    let loaded = second.get_user(id).unwrap().unwrap();
    assert_eq!(loaded, user);
}

#[test]
fn open_rejects_table_missing_required_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            role TEXT NOT NULL
        );",
    )
    .unwrap();
    drop(conn);

    let err = SqliteStore::open(StoreConfig::new(&path)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Db(DbError::MissingColumn {
            table: "users",
            column: "registration_date"
        })
    ));
}

#[test]
fn stored_dates_are_iso_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");
    let store = SqliteStore::open(StoreConfig::new(&path)).unwrap();

    let registered = chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(14, 0, 9)
        .unwrap();
    let mut user = User::registered_at("bo", "bo@example.com", UserRole::Manager, registered);
    let id = store.create_user(&mut user).unwrap();

    let conn = Connection::open(&path).unwrap();
    let (stored, kind): (String, String) = conn
        .query_row(
            "SELECT registration_date, typeof(registration_date) FROM users WHERE id = ?1;",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(stored, "2024-03-05T14:00:09");
    assert_eq!(kind, "text");
}

#[test]
fn undecodable_row_is_reported_as_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");
    let store = SqliteStore::open(StoreConfig::new(&path)).unwrap();

    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO users (username, email, role, registration_date)
         VALUES ('cy', 'cy@example.com', 'developer', 'yesterday');",
        [],
    )
    .unwrap();
    let id = conn.last_insert_rowid();

    let err = store.get_user(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)), "unexpected error: {err}");
}

fn table_count(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%';",
        [],
        |row| row.get(0),
    )
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
