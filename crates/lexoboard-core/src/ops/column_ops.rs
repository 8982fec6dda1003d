use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::board_ops::require_board;
use super::store::OrderedListStore;
use crate::errors::{BoardError, Result};
use crate::model::{now, Column};
use crate::position;
use crate::rules::validation;

/// Request to create a column positioned by anchors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumn {
    pub board_id: String,
    pub name: String,
    pub before_column_id: Option<String>,
    pub after_column_id: Option<String>,
}

impl CreateColumn {
    /// Idempotency scope
    pub fn scope(&self) -> String {
        format!("column_create/{}", self.board_id)
    }
}

/// Request to reposition a column among its board's columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveColumn {
    pub board_id: String,
    pub column_id: String,
    pub before_column_id: Option<String>,
    pub after_column_id: Option<String>,
}

impl MoveColumn {
    /// Idempotency scope
    pub fn scope(&self) -> String {
        format!("column_move/{}/{}", self.board_id, self.column_id)
    }
}

/// Create a column on a board
///
/// Without anchors the column is appended after the last one.
///
/// # Errors
/// * `Validation` - name blank or longer than 80 characters
/// * `BoardNotFound` - board does not exist
/// * `InvalidAnchor` - an anchor is not a column of this board, or the two
///   anchors are not neighbours
/// * `InvalidRange` - anchors given in reverse order
pub fn create_column<S: OrderedListStore + ?Sized>(
    store: &mut S,
    req: &CreateColumn,
) -> Result<Column> {
    let name = validation::column_name(&req.name)?;
    require_board(store, &req.board_id)?;

    let siblings = store.list_columns(&req.board_id)?;
    let sort_key = position::resolve_sort_key(
        &siblings,
        &req.board_id,
        req.before_column_id.as_deref(),
        req.after_column_id.as_deref(),
    )?;

    let ts = now();
    let column = Column {
        id: Uuid::now_v7().to_string(),
        board_id: req.board_id.clone(),
        name,
        sort_key,
        created_at: ts,
        updated_at: ts,
    };
    store.insert_column(&column)?;
    Ok(column)
}

/// Move a column to a new position on its board
///
/// Columns carry no version: concurrent moves of one column all succeed and
/// the last one to commit wins.
///
/// # Errors
/// * `ColumnNotFound` - column does not exist on this board
/// * `InvalidAnchor` / `InvalidRange` - as for [`create_column`]; the moving
///   column itself is never a valid anchor
pub fn move_column<S: OrderedListStore + ?Sized>(
    store: &mut S,
    req: &MoveColumn,
) -> Result<Column> {
    let mut column = require_column(store, &req.board_id, &req.column_id)?;

    let siblings: Vec<Column> = store
        .list_columns(&req.board_id)?
        .into_iter()
        .filter(|c| c.id != column.id)
        .collect();
    let sort_key = position::resolve_sort_key(
        &siblings,
        &req.board_id,
        req.before_column_id.as_deref(),
        req.after_column_id.as_deref(),
    )?;

    let ts = now();
    store.update_column_position(&column.id, &sort_key, ts)?;
    tracing::debug!(
        column_id = %column.id,
        from = %column.sort_key,
        to = %sort_key,
        "column moved"
    );
    column.sort_key = sort_key;
    column.updated_at = ts;
    Ok(column)
}

/// Delete a column together with its cards
///
/// # Errors
///
/// `ColumnNotFound` if the column does not exist on this board.
pub fn delete_column<S: OrderedListStore + ?Sized>(
    store: &mut S,
    board_id: &str,
    column_id: &str,
) -> Result<()> {
    require_column(store, board_id, column_id)?;
    store.delete_column(column_id)?;
    Ok(())
}

/// Load a column, requiring it to belong to `board_id`
pub(crate) fn require_column<S: OrderedListStore + ?Sized>(
    store: &S,
    board_id: &str,
    column_id: &str,
) -> Result<Column> {
    match store.get_column(column_id)? {
        Some(column) if column.board_id == board_id => Ok(column),
        _ => Err(BoardError::ColumnNotFound {
            column_id: column_id.to_string(),
            board_id: board_id.to_string(),
        }),
    }
}
