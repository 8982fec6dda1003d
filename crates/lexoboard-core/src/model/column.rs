use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Sibling;

/// Column - an ordered list of cards, itself ordered among its board's columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique identifier (UUID v7)
    pub id: String,

    /// Owning board; the sibling set is every column sharing it
    pub board_id: String,

    pub name: String,

    /// Position among sibling columns
    pub sort_key: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sibling for Column {
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
