//! Database connection management
//!
//! Provides utilities for opening and managing SQLite connections

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Busy timeout used when none is configured
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection for concurrent writers
///
/// Foreign keys must be on for cascading deletes. WAL lets readers proceed
/// while a writer holds the lock, and the busy timeout bounds how long a
/// writer waits for another one.
pub fn configure(conn: &Connection, busy_timeout: Duration) -> Result<()> {
    // Set first so switching a fresh file to WAL also waits on other openers
    conn.busy_timeout(busy_timeout).map_err(from_rusqlite)?;
    conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")
        .map_err(from_rusqlite)?;
    Ok(())
}
