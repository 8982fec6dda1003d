use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::store::OrderedListStore;
use crate::errors::{BoardError, Result};
use crate::model::{now, Board, BoardView, ColumnView};
use crate::rules::validation;

/// Request to create a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoard {
    pub name: String,
    pub description: Option<String>,
    /// Actor id recorded as the board's owner
    pub owner_id: String,
}

impl CreateBoard {
    /// Idempotency scope
    pub fn scope(&self) -> String {
        format!("board_create/{}", self.owner_id)
    }
}

/// Create a board
///
/// # Errors
///
/// `Validation` if the name is blank or longer than 140 characters.
pub fn create_board<S: OrderedListStore + ?Sized>(
    store: &mut S,
    req: &CreateBoard,
) -> Result<Board> {
    let name = validation::board_name(&req.name)?;
    let ts = now();
    let board = Board {
        id: Uuid::now_v7().to_string(),
        name,
        description: validation::description(req.description.as_deref()),
        owner_id: req.owner_id.clone(),
        created_at: ts,
        updated_at: ts,
    };
    store.insert_board(&board)?;
    Ok(board)
}

/// Load a board with its columns and cards in listing order
///
/// # Errors
///
/// `BoardNotFound` if the board does not exist.
pub fn board_view<S: OrderedListStore + ?Sized>(store: &S, board_id: &str) -> Result<BoardView> {
    let board = require_board(store, board_id)?;
    let columns = store
        .list_columns(board_id)?
        .into_iter()
        .map(|column| -> Result<ColumnView> {
            let cards = store.list_cards(&column.id)?;
            Ok(ColumnView { column, cards })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(BoardView { board, columns })
}

/// Delete a board together with its columns and cards
///
/// # Errors
///
/// `BoardNotFound` if the board does not exist.
pub fn delete_board<S: OrderedListStore + ?Sized>(store: &mut S, board_id: &str) -> Result<()> {
    if store.delete_board(board_id)? {
        Ok(())
    } else {
        Err(BoardError::BoardNotFound {
            board_id: board_id.to_string(),
        })
    }
}

pub(crate) fn require_board<S: OrderedListStore + ?Sized>(
    store: &S,
    board_id: &str,
) -> Result<Board> {
    store
        .get_board(board_id)?
        .ok_or_else(|| BoardError::BoardNotFound {
            board_id: board_id.to_string(),
        })
}
