//! Table definitions and schema readiness checks.
//!
//! # Invariants
//! - DDL only uses `CREATE TABLE IF NOT EXISTS`.
//! - Tables created by an older build must still expose every column listed
//!   in `REQUIRED_COLUMNS`.

use super::{DbError, DbResult};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Table names owned by the core, in creation order.
pub const TABLES: [&str; 3] = ["users", "projects", "tasks"];

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (
        "users",
        &["id", "username", "email", "role", "registration_date"],
    ),
    (
        "projects",
        &["id", "name", "description", "start_date", "end_date", "status"],
    ),
    (
        "tasks",
        &[
            "id",
            "title",
            "description",
            "priority",
            "status",
            "due_date",
            "project_id",
            "assignee_id",
        ],
    ),
];

/// Creates missing tables, then verifies that every table has the expected columns.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    for &(table, columns) in REQUIRED_COLUMNS {
        let existing = table_columns(conn, table)?;
        for &column in columns {
            if !existing.iter().any(|name| name.as_str() == column) {
                return Err(DbError::MissingColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}
