use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Sibling;

/// Card - an item ordered within a column
///
/// `board_id` is fixed at creation. `column_id`, `sort_key` and `version`
/// change only through a move, and every successful move bumps `version` by
/// exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier (UUID v7)
    pub id: String,

    pub board_id: String,

    /// Owning column; the sibling set is every card sharing it
    pub column_id: String,

    pub title: String,

    pub description: Option<String>,

    /// Position among sibling cards
    pub sort_key: String,

    /// Optimistic concurrency token for moves
    pub version: u64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sibling for Card {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.sort_key
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
