//! SQLite store handle.
//!
//! # Responsibility
//! - Bootstrap the schema once at construction.
//! - Hand each repository operation a fresh connection scope.
//!
//! # Invariants
//! - The store holds configuration only, never a live connection.
//! - A connection is dropped when its operation returns, on success or error.

use crate::config::StoreConfig;
use crate::db::open_connection;
use crate::db::schema::ensure_schema;
use crate::repo::RepoResult;
use log::{debug, error, info};
use rusqlite::Connection;
use std::time::Instant;

/// SQLite-backed implementation of the user, project and task repositories.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    config: StoreConfig,
}

impl SqliteStore {
    /// Opens the configured database file and creates missing tables.
    ///
    /// # Side effects
    /// - Creates the database file when absent.
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(config: StoreConfig) -> RepoResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=repo status=start");

        let result = open_connection(&config).and_then(|conn| ensure_schema(&conn));
        if let Err(err) = result {
            error!(
                "event=store_open module=repo status=error duration_ms={} error_code=schema_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }

        info!(
            "event=store_open module=repo status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Runs `op` on a connection that lives only for this call.
    pub(crate) fn with_connection<T>(
        &self,
        operation: &'static str,
        op: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let conn = open_connection(&self.config)?;

        match op(&conn) {
            Ok(value) => {
                debug!(
                    "event=repo_op module=repo status=ok op={} duration_ms={}",
                    operation,
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                error!(
                    "event=repo_op module=repo status=error op={} duration_ms={} error={}",
                    operation,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
