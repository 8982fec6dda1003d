use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::idempotency::{CachedResponse, IdempotencyKey};
use super::store::{IdempotencyLedger, OrderedListStore, Transactional, UnitOfWork};
use crate::errors::Result;
use crate::model::{order_siblings, Board, Card, Column};

/// In-memory backend
///
/// HashMap-based and single-threaded. Transactions stage changes on a clone
/// and swap it in only when the closure succeeds, so a failed write leaves
/// the store untouched.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    boards: HashMap<String, Board>,
    columns: HashMap<String, Column>,
    cards: HashMap<String, Card>,
    idempotency: HashMap<IdempotencyKey, CachedResponse>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards across all boards
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Number of columns across all boards
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl OrderedListStore for MemoryStore {
    fn get_board(&self, board_id: &str) -> Result<Option<Board>> {
        Ok(self.boards.get(board_id).cloned())
    }

    fn insert_board(&mut self, board: &Board) -> Result<()> {
        self.boards.insert(board.id.clone(), board.clone());
        Ok(())
    }

    fn delete_board(&mut self, board_id: &str) -> Result<bool> {
        if self.boards.remove(board_id).is_none() {
            return Ok(false);
        }
        self.columns.retain(|_, c| c.board_id != board_id);
        self.cards.retain(|_, c| c.board_id != board_id);
        Ok(true)
    }

    fn get_column(&self, column_id: &str) -> Result<Option<Column>> {
        Ok(self.columns.get(column_id).cloned())
    }

    fn list_columns(&self, board_id: &str) -> Result<Vec<Column>> {
        let mut columns: Vec<Column> = self
            .columns
            .values()
            .filter(|c| c.board_id == board_id)
            .cloned()
            .collect();
        order_siblings(&mut columns);
        Ok(columns)
    }

    fn insert_column(&mut self, column: &Column) -> Result<()> {
        self.columns.insert(column.id.clone(), column.clone());
        Ok(())
    }

    fn update_column_position(
        &mut self,
        column_id: &str,
        sort_key: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        if let Some(column) = self.columns.get_mut(column_id) {
            column.sort_key = sort_key.to_string();
            column.updated_at = updated_at;
        }
        Ok(())
    }

    fn delete_column(&mut self, column_id: &str) -> Result<bool> {
        if self.columns.remove(column_id).is_none() {
            return Ok(false);
        }
        self.cards.retain(|_, c| c.column_id != column_id);
        Ok(true)
    }

    fn get_card(&self, card_id: &str) -> Result<Option<Card>> {
        Ok(self.cards.get(card_id).cloned())
    }

    fn list_cards(&self, column_id: &str) -> Result<Vec<Card>> {
        let mut cards: Vec<Card> = self
            .cards
            .values()
            .filter(|c| c.column_id == column_id)
            .cloned()
            .collect();
        order_siblings(&mut cards);
        Ok(cards)
    }

    fn insert_card(&mut self, card: &Card) -> Result<()> {
        self.cards.insert(card.id.clone(), card.clone());
        Ok(())
    }

    fn update_card_position(
        &mut self,
        card_id: &str,
        expected_version: u64,
        column_id: &str,
        sort_key: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        match self.cards.get_mut(card_id) {
            Some(card) if card.version == expected_version => {
                card.column_id = column_id.to_string();
                card.sort_key = sort_key.to_string();
                card.version = expected_version + 1;
                card.updated_at = updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl IdempotencyLedger for MemoryStore {
    fn lookup(&self, key: &IdempotencyKey) -> Result<Option<CachedResponse>> {
        Ok(self.idempotency.get(key).cloned())
    }

    fn record(&mut self, key: &IdempotencyKey, response: &CachedResponse) -> Result<()> {
        self.idempotency.insert(key.clone(), response.clone());
        Ok(())
    }

    fn purge_expired(&mut self, cutoff: DateTime<Utc>) -> Result<usize> {
        let before = self.idempotency.len();
        self.idempotency.retain(|_, r| r.recorded_at >= cutoff);
        Ok(before - self.idempotency.len())
    }
}

impl Transactional for MemoryStore {
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> Result<T>,
    {
        let mut staged = self.clone();
        let out = f(&mut staged)?;
        *self = staged;
        Ok(out)
    }
}
