use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Card, Column};

/// Board - the scoping boundary for columns and cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique identifier (UUID v7)
    pub id: String,

    /// Display name, stored trimmed
    pub name: String,

    pub description: Option<String>,

    /// Actor id of the creator
    pub owner_id: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A board with its columns and cards in listing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<ColumnView>,
}

/// A column with its cards in listing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    #[serde(flatten)]
    pub column: Column,
    pub cards: Vec<Card>,
}

impl BoardView {
    /// Total number of cards across all columns
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}
