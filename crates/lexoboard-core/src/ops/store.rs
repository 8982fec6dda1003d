//! Persistence contract for ordered sibling sets
//!
//! Core operations are written against [`OrderedListStore`] and never see a
//! concrete backend. A backend also implements [`IdempotencyLedger`] and
//! [`Transactional`]; the engine runs each write, together with its
//! idempotency check and record, inside one [`Transactional::atomically`]
//! call so that either all of it is visible or none of it is.

use chrono::{DateTime, Utc};

use super::idempotency::{CachedResponse, IdempotencyKey};
use crate::errors::Result;
use crate::model::{Board, Card, Column};

/// Reads and writes of boards, columns and cards
///
/// `list_*` return the full sibling set in listing order
/// (`sort_key`, `created_at`, `id`).
pub trait OrderedListStore {
    fn get_board(&self, board_id: &str) -> Result<Option<Board>>;

    fn insert_board(&mut self, board: &Board) -> Result<()>;

    /// Delete a board with all its columns and cards; `false` if it was absent
    fn delete_board(&mut self, board_id: &str) -> Result<bool>;

    fn get_column(&self, column_id: &str) -> Result<Option<Column>>;

    fn list_columns(&self, board_id: &str) -> Result<Vec<Column>>;

    fn insert_column(&mut self, column: &Column) -> Result<()>;

    /// Overwrite a column's position (last write wins)
    fn update_column_position(
        &mut self,
        column_id: &str,
        sort_key: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Delete a column with all its cards; `false` if it was absent
    fn delete_column(&mut self, column_id: &str) -> Result<bool>;

    fn get_card(&self, card_id: &str) -> Result<Option<Card>>;

    fn list_cards(&self, column_id: &str) -> Result<Vec<Card>>;

    fn insert_card(&mut self, card: &Card) -> Result<()>;

    /// Move a card if its version still equals `expected_version`
    ///
    /// On success the card takes `column_id` and `sort_key`, its version
    /// becomes `expected_version + 1` and `true` is returned. Returns `false`
    /// and changes nothing if the card is absent or at another version.
    fn update_card_position(
        &mut self,
        card_id: &str,
        expected_version: u64,
        column_id: &str,
        sort_key: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;
}

/// Cached responses of idempotent writes
pub trait IdempotencyLedger {
    fn lookup(&self, key: &IdempotencyKey) -> Result<Option<CachedResponse>>;

    /// Insert or replace the response cached under `key`
    fn record(&mut self, key: &IdempotencyKey, response: &CachedResponse) -> Result<()>;

    /// Remove responses recorded before `cutoff`, returning how many were removed
    fn purge_expired(&mut self, cutoff: DateTime<Utc>) -> Result<usize>;
}

/// Everything a write may touch inside one transaction
pub trait UnitOfWork: OrderedListStore + IdempotencyLedger {}

impl<T: OrderedListStore + IdempotencyLedger> UnitOfWork for T {}

/// A backend able to run a closure atomically
pub trait Transactional {
    /// Run `f` in a transaction: commit if it returns `Ok`, roll back otherwise
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or `Persistence` if the transaction
    /// cannot be opened or committed.
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> Result<T>;
}
