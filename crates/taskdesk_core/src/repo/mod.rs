//! Storage engine: repository contracts and their SQLite implementation.
//!
//! # Responsibility
//! - Define per-entity CRUD and query contracts.
//! - Translate between entities and `users`/`projects`/`tasks` rows.
//! - Map SQLite constraint failures to semantic integrity errors.
//!
//! # Invariants
//! - Every operation runs on its own short-lived connection.
//! - Writes validate entities before touching SQL.
//! - Reads reject undecodable rows instead of masking them.
//! - Deleting a missing id is a no-op.

use crate::db::DbError;
use crate::model::ValidationError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod codec;
pub mod project_repo;
mod store;
pub mod task_repo;
pub mod user_repo;

pub use store::SqliteStore;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity family addressed by an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Project,
    Task,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Project => "project",
            Self::Task => "task",
        })
    }
}

/// Error for storage and service operations.
#[derive(Debug)]
pub enum RepoError {
    /// Entity or update input failed domain validation.
    Validation(ValidationError),
    /// Operation requires an existing row.
    NotFound { entity: EntityKind, id: i64 },
    /// Unique, check or foreign-key constraint rejected the write.
    Integrity(String),
    Db(DbError),
    /// Persisted row could not be decoded into an entity.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Integrity(message) => write!(f, "integrity constraint violated: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::Integrity(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(err, message)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Self::Integrity(message.unwrap_or_else(|| err.to_string()))
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}
