//! SQLite implementation of the ordered-list store contract
//!
//! `SqliteStore` owns the connection and hands out a `SqliteUnitOfWork` per
//! transaction. Write transactions open with `BEGIN IMMEDIATE`, so two
//! writers never read the same snapshot: the second waits (up to the busy
//! timeout) until the first commits, then sees its result.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use lexoboard_core::errors::Result as CoreResult;
use lexoboard_core::model::{Board, Card, Column};
use lexoboard_core::ops::{
    CachedResponse, IdempotencyKey, IdempotencyLedger, OpStatus, OrderedListStore, Transactional,
    UnitOfWork,
};
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior};

use crate::db;
use crate::errors::{db_error, Result};
use crate::migrations::apply_migrations;

/// SQLite-backed store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file, configure it and apply migrations
    pub fn open<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        let conn = db::open(path)?;
        Self::from_connection(conn, busy_timeout)
    }

    /// Open a private in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Self::from_connection(conn, db::DEFAULT_BUSY_TIMEOUT)
    }

    fn from_connection(mut conn: Connection, busy_timeout: Duration) -> Result<Self> {
        db::configure(&conn, busy_timeout)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Borrow the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Transactional for SqliteStore {
    fn atomically<T, F>(&mut self, f: F) -> CoreResult<T>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> CoreResult<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_error("begin"))?;
        let out = {
            let mut uow = SqliteUnitOfWork { conn: &tx };
            f(&mut uow)?
        };
        tx.commit().map_err(db_error("commit"))?;
        Ok(out)
    }
}

/// Store-contract view of one open transaction
///
/// Only `SqliteStore::atomically` constructs it, so every contract call runs
/// under the write lock.
pub struct SqliteUnitOfWork<'c> {
    conn: &'c Connection,
}

fn millis(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

fn millis_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let ms: i64 = row.get(idx)?;
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, ms))
}

fn version_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let v: i64 = row.get(idx)?;
    u64::try_from(v).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, v))
}

fn board_from_row(row: &Row<'_>) -> rusqlite::Result<Board> {
    Ok(Board {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        owner_id: row.get(3)?,
        created_at: millis_at(row, 4)?,
        updated_at: millis_at(row, 5)?,
    })
}

fn column_from_row(row: &Row<'_>) -> rusqlite::Result<Column> {
    Ok(Column {
        id: row.get(0)?,
        board_id: row.get(1)?,
        name: row.get(2)?,
        sort_key: row.get(3)?,
        created_at: millis_at(row, 4)?,
        updated_at: millis_at(row, 5)?,
    })
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        board_id: row.get(1)?,
        column_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        sort_key: row.get(5)?,
        version: version_at(row, 6)?,
        created_at: millis_at(row, 7)?,
        updated_at: millis_at(row, 8)?,
    })
}

const BOARD_COLUMNS: &str = "id, name, description, owner_id, created_at, updated_at";
const COLUMN_COLUMNS: &str = "id, board_id, name, sort_key, created_at, updated_at";
const CARD_COLUMNS: &str =
    "id, board_id, column_id, title, description, sort_key, version, created_at, updated_at";

impl OrderedListStore for SqliteUnitOfWork<'_> {
    fn get_board(&self, board_id: &str) -> CoreResult<Option<Board>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM boards WHERE id = ?1", BOARD_COLUMNS),
                [board_id],
                board_from_row,
            )
            .optional()
            .map_err(db_error("get_board"))
    }

    fn insert_board(&mut self, board: &Board) -> CoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO boards (id, name, description, owner_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    board.id,
                    board.name,
                    board.description,
                    board.owner_id,
                    millis(board.created_at),
                    millis(board.updated_at),
                ],
            )
            .map_err(db_error("insert_board"))?;
        Ok(())
    }

    fn delete_board(&mut self, board_id: &str) -> CoreResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM boards WHERE id = ?1", [board_id])
            .map_err(db_error("delete_board"))?;
        Ok(n > 0)
    }

    fn get_column(&self, column_id: &str) -> CoreResult<Option<Column>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM columns WHERE id = ?1", COLUMN_COLUMNS),
                [column_id],
                column_from_row,
            )
            .optional()
            .map_err(db_error("get_column"))
    }

    fn list_columns(&self, board_id: &str) -> CoreResult<Vec<Column>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!(
                "SELECT {} FROM columns WHERE board_id = ?1 ORDER BY sort_key, created_at, id",
                COLUMN_COLUMNS
            ))
            .map_err(db_error("list_columns"))?;
        let columns = stmt
            .query_map([board_id], column_from_row)
            .map_err(db_error("list_columns"))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_error("list_columns"))?;
        Ok(columns)
    }

    fn insert_column(&mut self, column: &Column) -> CoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO columns (id, board_id, name, sort_key, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    column.id,
                    column.board_id,
                    column.name,
                    column.sort_key,
                    millis(column.created_at),
                    millis(column.updated_at),
                ],
            )
            .map_err(db_error("insert_column"))?;
        Ok(())
    }

    fn update_column_position(
        &mut self,
        column_id: &str,
        sort_key: &str,
        updated_at: DateTime<Utc>,
    ) -> CoreResult<()> {
        self.conn
            .execute(
                "UPDATE columns SET sort_key = ?1, updated_at = ?2 WHERE id = ?3",
                rusqlite::params![sort_key, millis(updated_at), column_id],
            )
            .map_err(db_error("update_column_position"))?;
        Ok(())
    }

    fn delete_column(&mut self, column_id: &str) -> CoreResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM columns WHERE id = ?1", [column_id])
            .map_err(db_error("delete_column"))?;
        Ok(n > 0)
    }

    fn get_card(&self, card_id: &str) -> CoreResult<Option<Card>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM cards WHERE id = ?1", CARD_COLUMNS),
                [card_id],
                card_from_row,
            )
            .optional()
            .map_err(db_error("get_card"))
    }

    fn list_cards(&self, column_id: &str) -> CoreResult<Vec<Card>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!(
                "SELECT {} FROM cards WHERE column_id = ?1 ORDER BY sort_key, created_at, id",
                CARD_COLUMNS
            ))
            .map_err(db_error("list_cards"))?;
        let cards = stmt
            .query_map([column_id], card_from_row)
            .map_err(db_error("list_cards"))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_error("list_cards"))?;
        Ok(cards)
    }

    fn insert_card(&mut self, card: &Card) -> CoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO cards (id, board_id, column_id, title, description, sort_key, version,
                                    created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    card.id,
                    card.board_id,
                    card.column_id,
                    card.title,
                    card.description,
                    card.sort_key,
                    card.version as i64,
                    millis(card.created_at),
                    millis(card.updated_at),
                ],
            )
            .map_err(db_error("insert_card"))?;
        Ok(())
    }

    fn update_card_position(
        &mut self,
        card_id: &str,
        expected_version: u64,
        column_id: &str,
        sort_key: &str,
        updated_at: DateTime<Utc>,
    ) -> CoreResult<bool> {
        let n = self
            .conn
            .execute(
                "UPDATE cards
                 SET column_id = ?1, sort_key = ?2, version = version + 1, updated_at = ?3
                 WHERE id = ?4 AND version = ?5",
                rusqlite::params![
                    column_id,
                    sort_key,
                    millis(updated_at),
                    card_id,
                    expected_version as i64,
                ],
            )
            .map_err(db_error("update_card_position"))?;
        Ok(n == 1)
    }
}

impl IdempotencyLedger for SqliteUnitOfWork<'_> {
    fn lookup(&self, key: &IdempotencyKey) -> CoreResult<Option<CachedResponse>> {
        let row = self
            .conn
            .query_row(
                "SELECT status, body, recorded_at FROM idempotency_keys
                 WHERE token = ?1 AND scope = ?2",
                [&key.token, &key.scope],
                |row| {
                    let status: u16 = row.get(0)?;
                    let body: String = row.get(1)?;
                    let recorded_at = millis_at(row, 2)?;
                    Ok((status, body, recorded_at))
                },
            )
            .optional()
            .map_err(db_error("idempotency_lookup"))?;

        let Some((code, body, recorded_at)) = row else {
            return Ok(None);
        };
        let status = OpStatus::from_code(code).ok_or_else(|| {
            db_error("idempotency_lookup")(rusqlite::Error::IntegralValueOutOfRange(
                0,
                i64::from(code),
            ))
        })?;
        Ok(Some(CachedResponse {
            status,
            body,
            recorded_at,
        }))
    }

    fn record(&mut self, key: &IdempotencyKey, response: &CachedResponse) -> CoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO idempotency_keys (token, scope, status, body, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(token, scope) DO UPDATE SET
                    status = excluded.status,
                    body = excluded.body,
                    recorded_at = excluded.recorded_at",
                rusqlite::params![
                    key.token,
                    key.scope,
                    response.status.code(),
                    response.body,
                    millis(response.recorded_at),
                ],
            )
            .map_err(db_error("idempotency_record"))?;
        Ok(())
    }

    fn purge_expired(&mut self, cutoff: DateTime<Utc>) -> CoreResult<usize> {
        self.conn
            .execute(
                "DELETE FROM idempotency_keys WHERE recorded_at < ?1",
                [millis(cutoff)],
            )
            .map_err(db_error("idempotency_purge"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexoboard_core::errors::BoardError;
    use lexoboard_core::model::now;

    fn board(id: &str) -> Board {
        let ts = now();
        Board {
            id: id.to_string(),
            name: "Board".to_string(),
            description: None,
            owner_id: "u1".to_string(),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_board_round_trip_keeps_millisecond_timestamps() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let b = board("b1");
        store
            .atomically(|uow| uow.insert_board(&b))
            .unwrap();

        let loaded = store.atomically(|uow| uow.get_board("b1")).unwrap();
        assert_eq!(loaded, Some(b));
    }

    #[test]
    fn test_failed_closure_rolls_back() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let result: CoreResult<()> = store.atomically(|uow| {
            uow.insert_board(&board("b1"))?;
            Err(BoardError::Persistence {
                op: "test".to_string(),
                message: "abort".to_string(),
            })
        });
        assert!(result.is_err());

        let loaded = store.atomically(|uow| uow.get_board("b1")).unwrap();
        assert!(loaded.is_none());
    }
}
