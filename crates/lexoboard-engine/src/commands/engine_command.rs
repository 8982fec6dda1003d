//! Single entry point over every engine command.

use lexoboard_core::errors::{BoardError, ExError};
use lexoboard_core::model::{Board, BoardView, Card, Column};
use lexoboard_core::ops::{
    CreateBoard, CreateCard, CreateColumn, IdempotentOutcome, MoveCard, MoveColumn, Transactional,
};
use lexoboard_core_types::RequestContext;

use super::{board, card, column, maintenance, Result};
use crate::config::EngineConfig;

/// Engine commands as issued by a calling layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    BoardCreate(CreateBoard),
    BoardView { board_id: String },
    BoardDelete { board_id: String },
    ColumnCreate(CreateColumn),
    ColumnMove(MoveColumn),
    ColumnDelete { board_id: String, column_id: String },
    CardCreate(CreateCard),
    CardMove(MoveCard),
    IdempotencyPurge,
}

impl EngineCommand {
    /// Whether the command changes board state; callers gate these on a
    /// writer role
    pub fn is_write(&self) -> bool {
        !matches!(self, EngineCommand::BoardView { .. })
    }
}

/// Result of applying an engine command.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommandResult {
    Board(IdempotentOutcome<Board>),
    BoardView(BoardView),
    Column(IdempotentOutcome<Column>),
    Card(IdempotentOutcome<Card>),
    Deleted { entity_id: String },
    Purged { removed: usize },
}

impl EngineCommandResult {
    /// Status code a transport would answer with
    pub fn status(&self) -> u16 {
        match self {
            EngineCommandResult::Board(o) => o.status.code(),
            EngineCommandResult::Column(o) => o.status.code(),
            EngineCommandResult::Card(o) => o.status.code(),
            EngineCommandResult::Deleted { .. } => 204,
            EngineCommandResult::BoardView(_) | EngineCommandResult::Purged { .. } => 200,
        }
    }

    /// Whether a cached response was returned instead of running the write
    pub fn replayed(&self) -> bool {
        match self {
            EngineCommandResult::Board(o) => o.replayed,
            EngineCommandResult::Column(o) => o.replayed,
            EngineCommandResult::Card(o) => o.replayed,
            _ => false,
        }
    }

    /// JSON response body
    ///
    /// Guarded writes return their recorded body unchanged, so a replay is
    /// byte-identical to the first response.
    ///
    /// # Errors
    ///
    /// `Serialization` if a board view cannot be encoded.
    pub fn to_json(&self) -> Result<String> {
        let encoded = match self {
            EngineCommandResult::Board(o) => return Ok(o.body.clone()),
            EngineCommandResult::Column(o) => return Ok(o.body.clone()),
            EngineCommandResult::Card(o) => return Ok(o.body.clone()),
            EngineCommandResult::BoardView(view) => serde_json::to_string(view),
            EngineCommandResult::Deleted { entity_id } => {
                serde_json::to_string(&serde_json::json!({ "deleted": entity_id }))
            }
            EngineCommandResult::Purged { removed } => {
                serde_json::to_string(&serde_json::json!({ "removed": removed }))
            }
        };
        encoded.map_err(|e| ExError::from(BoardError::from(e)))
    }
}

/// Apply an engine command against a store.
///
/// # Errors
///
/// Whatever the dispatched command returns.
pub fn apply_engine_command<S: Transactional>(
    cmd: EngineCommand,
    store: &mut S,
    config: &EngineConfig,
    ctx: &RequestContext,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::BoardCreate(req) => {
            board::board_create(store, config, ctx, &req).map(EngineCommandResult::Board)
        }
        EngineCommand::BoardView { board_id } => {
            board::board_view(store, ctx, &board_id).map(EngineCommandResult::BoardView)
        }
        EngineCommand::BoardDelete { board_id } => {
            board::board_delete(store, ctx, &board_id)?;
            Ok(EngineCommandResult::Deleted {
                entity_id: board_id,
            })
        }
        EngineCommand::ColumnCreate(req) => {
            column::column_create(store, config, ctx, &req).map(EngineCommandResult::Column)
        }
        EngineCommand::ColumnMove(req) => {
            column::column_move(store, config, ctx, &req).map(EngineCommandResult::Column)
        }
        EngineCommand::ColumnDelete {
            board_id,
            column_id,
        } => {
            column::column_delete(store, ctx, &board_id, &column_id)?;
            Ok(EngineCommandResult::Deleted {
                entity_id: column_id,
            })
        }
        EngineCommand::CardCreate(req) => {
            card::card_create(store, config, ctx, &req).map(EngineCommandResult::Card)
        }
        EngineCommand::CardMove(req) => {
            card::card_move(store, config, ctx, &req).map(EngineCommandResult::Card)
        }
        EngineCommand::IdempotencyPurge => maintenance::idempotency_purge(store, config, ctx)
            .map(|removed| EngineCommandResult::Purged { removed }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexoboard_core::MemoryStore;

    #[test]
    fn test_only_board_view_is_read_only() {
        let view = EngineCommand::BoardView {
            board_id: "b1".to_string(),
        };
        assert!(!view.is_write());
        assert!(EngineCommand::IdempotencyPurge.is_write());
    }

    #[test]
    fn test_dispatch_create_then_view() {
        let mut store = MemoryStore::new();
        let config = EngineConfig::default();
        let ctx = RequestContext::new();

        let created = apply_engine_command(
            EngineCommand::BoardCreate(CreateBoard {
                name: "Roadmap".to_string(),
                description: None,
                owner_id: "u1".to_string(),
            }),
            &mut store,
            &config,
            &ctx,
        )
        .unwrap();
        assert_eq!(created.status(), 201);
        let board_id = match created {
            EngineCommandResult::Board(o) => o.value.id,
            other => panic!("unexpected result {:?}", other),
        };

        let viewed = apply_engine_command(
            EngineCommand::BoardView {
                board_id: board_id.clone(),
            },
            &mut store,
            &config,
            &ctx,
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&viewed.to_json().unwrap()).unwrap();
        assert_eq!(json["id"], board_id.as_str());
        assert_eq!(json["columns"], serde_json::json!([]));
    }

    #[test]
    fn test_delete_body_names_entity() {
        let result = EngineCommandResult::Deleted {
            entity_id: "c9".to_string(),
        };
        assert_eq!(result.status(), 204);
        assert_eq!(result.to_json().unwrap(), r#"{"deleted":"c9"}"#);
    }
}
