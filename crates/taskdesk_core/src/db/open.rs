//! Per-operation connection bootstrap.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` so cascades fire.
//! - Returned connections honor the configured busy timeout.

use super::DbResult;
use crate::config::StoreConfig;
use log::{debug, error};
use rusqlite::Connection;
use std::time::Instant;

/// Opens and configures a connection to the configured database file.
///
/// The caller owns the connection; dropping it releases the file handle.
pub fn open_connection(config: &StoreConfig) -> DbResult<Connection> {
    let started_at = Instant::now();

    let conn = match Connection::open(&config.db_path).and_then(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(config.busy_timeout)?;
        Ok(conn)
    }) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_connect module=db status=error duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    debug!(
        "event=db_connect module=db status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}
