//! Migration runner
//!
//! Applies pending migrations in order and records a checksum per migration
//! in `schema_version`. The whole run holds one `BEGIN IMMEDIATE`
//! transaction, so connections opening a fresh database file at the same
//! time apply each migration exactly once: later openers wait on the write
//! lock and then find the migrations already recorded.

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::embedded::{Migration, MIGRATIONS};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

/// Apply all pending migrations to the database
///
/// Already-applied migrations are skipped after their recorded checksum is
/// compared with the embedded SQL.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    create_schema_version_table(&tx)?;
    for migration in MIGRATIONS {
        apply_migration(&tx, migration)?;
    }

    tx.commit().map_err(from_rusqlite)?;
    Ok(())
}

/// Ids of applied migrations, oldest first
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT migration_id FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(ids)
}

fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT NOT NULL
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Check or apply one migration; `conn` must be inside the write transaction
fn apply_migration(conn: &Connection, migration: &Migration) -> Result<()> {
    let checksum = migration.checksum();

    let recorded: Option<String> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?",
            [migration.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(recorded) = recorded {
        if recorded != checksum {
            return Err(checksum_mismatch(migration.id, &recorded, &checksum));
        }
        return Ok(());
    }

    conn.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, &e.to_string()))?;

    conn.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?, ?, ?)",
        rusqlite::params![migration.id, chrono::Utc::now().timestamp(), checksum],
    )
    .map_err(from_rusqlite)?;

    tracing::debug!(migration_id = migration.id, "migration applied");
    Ok(())
}
