//! User repository contract and SQLite implementation.
//!
//! # Invariants
//! - `username` and `email` uniqueness is enforced by the `users` table.
//! - `registration_date` is written once on insert and has no update path.
//! - Deleting a user cascades to tasks assigned to that user.

use crate::model::user::{User, UserId, UserUpdate};
use crate::model::validation::ensure_not_blank;
use crate::repo::codec::{
    enum_column, query_all, query_optional, timestamp_column, timestamp_to_db, Assignments,
};
use crate::repo::{RepoResult, SqliteStore};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    email,
    role,
    registration_date
FROM users";

/// Repository interface for user records.
pub trait UserRepository {
    /// Inserts `user`, stores the assigned id on it and returns that id.
    fn create_user(&self, user: &mut User) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Lists all users in insertion order.
    fn list_users(&self) -> RepoResult<Vec<User>>;
    /// Writes the set fields of `changes`; an empty update is a no-op.
    fn update_user(&self, id: UserId, changes: &UserUpdate) -> RepoResult<()>;
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
}

impl UserRepository for SqliteStore {
    fn create_user(&self, user: &mut User) -> RepoResult<UserId> {
        user.validate()?;

        let id = self.with_connection("create_user", |conn| {
            conn.execute(
                "INSERT INTO users (
                    username,
                    email,
                    role,
                    registration_date
                ) VALUES (?1, ?2, ?3, ?4);",
                params![
                    user.username.as_str(),
                    user.email.as_str(),
                    user.role.as_str(),
                    timestamp_to_db(user.registration_date),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        user.id = Some(id);
        Ok(id)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.with_connection("get_user", |conn| {
            query_optional(
                conn,
                &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_user_row,
            )
        })
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        self.with_connection("list_users", |conn| {
            query_all(
                conn,
                &format!("{USER_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_user_row,
            )
        })
    }

    fn update_user(&self, id: UserId, changes: &UserUpdate) -> RepoResult<()> {
        let mut assignments = Assignments::default();
        if let Some(username) = &changes.username {
            ensure_not_blank("username", username)?;
            assignments.set("username", Value::Text(username.clone()));
        }
        if let Some(email) = &changes.email {
            ensure_not_blank("email", email)?;
            assignments.set("email", Value::Text(email.clone()));
        }
        if let Some(role) = changes.role {
            assignments.set("role", Value::Text(role.as_str().to_string()));
        }
        if assignments.is_empty() {
            return Ok(());
        }

        let changed =
            self.with_connection("update_user", move |conn| assignments.execute(conn, "users", id))?;
        debug!("event=user_update module=repo status=ok user_id={id} changed={changed}");
        Ok(())
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self.with_connection("delete_user", |conn| {
            Ok(conn.execute("DELETE FROM users WHERE id = ?1;", [id])?)
        })?;
        debug!("event=user_delete module=repo status=ok user_id={id} changed={changed}");
        Ok(())
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: Some(row.get("id")?),
        username: row.get("username")?,
        email: row.get("email")?,
        role: enum_column(row, "role")?,
        registration_date: timestamp_column(row, "registration_date")?,
    })
}
