//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas from `ConnectionConfig`.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections carry the configured `foreign_keys` and busy timeout.
//! - When `migrate` is set, returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::DbResult;
use crate::config::ConnectionConfig;
use log::{debug, error};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Opens a database file with default options and applies pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with_config(&ConnectionConfig::new(path.as_ref()))
}

/// Opens the database named by `config` and bootstraps it.
///
/// # Side effects
/// - Applies pending migrations when `config.migrate` is set.
/// - Emits `db_open` logging events with duration and status.
pub fn open_with_config(config: &ConnectionConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    debug!("event=db_open module=db status=start mode=file");

    let conn = Connection::open(config.path());
    finish_open(conn, config, "file", started_at)
}

/// Opens an in-memory database with default options and applies all migrations.
///
/// Useful for schema checks; repositories never use in-memory databases.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    debug!("event=db_open module=db status=start mode=memory");

    let config = ConnectionConfig::new(":memory:");
    let conn = Connection::open_in_memory();
    finish_open(conn, &config, "memory", started_at)
}

fn finish_open(
    conn: rusqlite::Result<Connection>,
    config: &ConnectionConfig,
    mode: &str,
    started_at: Instant,
) -> DbResult<Connection> {
    let mut conn = match conn {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, config) {
        Ok(()) => {
            debug!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, config: &ConnectionConfig) -> DbResult<()> {
    let foreign_keys = if config.foreign_keys { "ON" } else { "OFF" };
    conn.execute_batch(&format!("PRAGMA foreign_keys = {foreign_keys};"))?;
    conn.busy_timeout(config.busy_timeout)?;
    if config.migrate {
        apply_migrations(conn)?;
    }
    Ok(())
}
