//! Card creation and moves
//!
//! A move runs its checks in a fixed order so that callers can rely on which
//! error wins when several apply:
//!
//! 1. card exists (`CardNotFound`)
//! 2. card is on the requested board (`InvalidMove`)
//! 3. target column exists and shares the card's board (`ColumnNotFound`,
//!    `InvalidMove`)
//! 4. `expected_version` matches (`PreconditionFailed`)
//! 5. anchors resolve under the target column (`InvalidAnchor`, `InvalidRange`)
//! 6. compare-and-set on the version read in step 1 (`PreconditionFailed`)
//!
//! Nothing is written before step 6.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::board_ops::require_board;
use super::column_ops::require_column;
use super::store::OrderedListStore;
use crate::errors::{BoardError, Result};
use crate::model::{now, Card};
use crate::position;
use crate::rules::validation;

/// Request to create a card in a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCard {
    pub board_id: String,
    pub column_id: String,
    pub title: String,
    pub description: Option<String>,
    pub before_card_id: Option<String>,
    pub after_card_id: Option<String>,
}

impl CreateCard {
    /// Idempotency scope
    pub fn scope(&self) -> String {
        format!("card_create/{}/{}", self.board_id, self.column_id)
    }
}

/// Request to move a card within or across columns of one board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCard {
    pub board_id: String,
    pub card_id: String,
    /// Target column; the card's current column when absent
    pub to_column_id: Option<String>,
    pub before_card_id: Option<String>,
    pub after_card_id: Option<String>,
    /// Version the caller last saw; unchecked when absent
    pub expected_version: Option<u64>,
}

impl MoveCard {
    /// Idempotency scope
    pub fn scope(&self) -> String {
        format!("card_move/{}/{}", self.board_id, self.card_id)
    }
}

/// Create a card at version 0
///
/// # Errors
/// * `Validation` - title blank or longer than 200 characters
/// * `BoardNotFound` - board does not exist
/// * `ColumnNotFound` - column does not exist on this board
/// * `InvalidAnchor` / `InvalidRange` - anchors do not name neighbouring
///   cards of the column
pub fn create_card<S: OrderedListStore + ?Sized>(store: &mut S, req: &CreateCard) -> Result<Card> {
    let title = validation::card_title(&req.title)?;
    require_board(store, &req.board_id)?;
    require_column(store, &req.board_id, &req.column_id)?;

    let siblings = store.list_cards(&req.column_id)?;
    let sort_key = position::resolve_sort_key(
        &siblings,
        &req.column_id,
        req.before_card_id.as_deref(),
        req.after_card_id.as_deref(),
    )?;

    let ts = now();
    let card = Card {
        id: Uuid::now_v7().to_string(),
        board_id: req.board_id.clone(),
        column_id: req.column_id.clone(),
        title,
        description: validation::description(req.description.as_deref()),
        sort_key,
        version: 0,
        created_at: ts,
        updated_at: ts,
    };
    store.insert_card(&card)?;
    Ok(card)
}

/// Move a card, bumping its version by one
///
/// # Errors
/// * `CardNotFound` - card does not exist
/// * `InvalidMove` - card or target column is on another board
/// * `ColumnNotFound` - target column does not exist
/// * `PreconditionFailed` - version differs from `expected_version`, or a
///   concurrent move committed first
/// * `InvalidAnchor` / `InvalidRange` - anchors do not name neighbouring
///   cards of the target column
pub fn move_card<S: OrderedListStore + ?Sized>(store: &mut S, req: &MoveCard) -> Result<Card> {
    let card = store
        .get_card(&req.card_id)?
        .ok_or_else(|| BoardError::CardNotFound {
            card_id: req.card_id.clone(),
        })?;

    if card.board_id != req.board_id {
        return Err(BoardError::InvalidMove {
            card_id: card.id,
            reason: format!("card belongs to board {}, not {}", card.board_id, req.board_id),
        });
    }

    let target_id = req.to_column_id.as_deref().unwrap_or(&card.column_id);
    let target = store
        .get_column(target_id)?
        .ok_or_else(|| BoardError::ColumnNotFound {
            column_id: target_id.to_string(),
            board_id: req.board_id.clone(),
        })?;
    if target.board_id != card.board_id {
        return Err(BoardError::InvalidMove {
            card_id: card.id,
            reason: format!(
                "target column {} belongs to board {}, card stays on {}",
                target.id, target.board_id, card.board_id
            ),
        });
    }

    if let Some(expected) = req.expected_version {
        if expected != card.version {
            return Err(BoardError::PreconditionFailed {
                card_id: card.id,
                expected_version: expected,
                actual_version: card.version,
            });
        }
    }

    let siblings: Vec<Card> = store
        .list_cards(&target.id)?
        .into_iter()
        .filter(|c| c.id != card.id)
        .collect();
    let sort_key = position::resolve_sort_key(
        &siblings,
        &target.id,
        req.before_card_id.as_deref(),
        req.after_card_id.as_deref(),
    )?;

    let ts = now();
    if !store.update_card_position(&card.id, card.version, &target.id, &sort_key, ts)? {
        let actual = store
            .get_card(&card.id)?
            .map(|c| c.version)
            .unwrap_or(card.version);
        return Err(BoardError::PreconditionFailed {
            card_id: card.id,
            expected_version: card.version,
            actual_version: actual,
        });
    }

    tracing::debug!(
        card_id = %card.id,
        from_column = %card.column_id,
        to_column = %target.id,
        sort_key = %sort_key,
        "card moved"
    );

    Ok(Card {
        column_id: target.id,
        sort_key,
        version: card.version + 1,
        updated_at: ts,
        ..card
    })
}
