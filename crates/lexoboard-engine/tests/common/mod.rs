use lexoboard_core::ops::{CreateBoard, CreateCard, CreateColumn, Transactional};
use lexoboard_core::model::BoardView;
use lexoboard_core::{Board, Card, Column};
use lexoboard_core_types::RequestContext;
use lexoboard_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use lexoboard_engine::commands::open_store;
use lexoboard_engine::EngineConfig;
use lexoboard_store::SqliteStore;
use tempfile::TempDir;

/// Fresh on-disk SQLite store inside a temp dir
#[allow(dead_code)]
pub fn setup_sqlite() -> (TempDir, SqliteStore) {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir.path().join("board.db"), &EngineConfig::default()).unwrap();
    (dir, store)
}

/// Run a command with default config and a fresh request context
#[allow(dead_code)]
pub fn run<S: Transactional>(store: &mut S, cmd: EngineCommand) -> EngineCommandResult {
    apply_engine_command(cmd, store, &EngineConfig::default(), &RequestContext::new())
        .expect("Command should succeed")
}

#[allow(dead_code)]
pub fn create_board<S: Transactional>(store: &mut S, name: &str) -> Board {
    let cmd = EngineCommand::BoardCreate(CreateBoard {
        name: name.to_string(),
        description: None,
        owner_id: "owner-1".to_string(),
    });
    match run(store, cmd) {
        EngineCommandResult::Board(o) => o.value,
        other => panic!("expected a board, got {:?}", other),
    }
}

#[allow(dead_code)]
pub fn create_column<S: Transactional>(store: &mut S, board_id: &str, name: &str) -> Column {
    let cmd = EngineCommand::ColumnCreate(column_req(board_id, name));
    match run(store, cmd) {
        EngineCommandResult::Column(o) => o.value,
        other => panic!("expected a column, got {:?}", other),
    }
}

#[allow(dead_code)]
pub fn create_card<S: Transactional>(
    store: &mut S,
    board_id: &str,
    column_id: &str,
    title: &str,
) -> Card {
    let cmd = EngineCommand::CardCreate(card_req(board_id, column_id, title));
    match run(store, cmd) {
        EngineCommandResult::Card(o) => o.value,
        other => panic!("expected a card, got {:?}", other),
    }
}

#[allow(dead_code)]
pub fn view<S: Transactional>(store: &mut S, board_id: &str) -> BoardView {
    let cmd = EngineCommand::BoardView {
        board_id: board_id.to_string(),
    };
    match run(store, cmd) {
        EngineCommandResult::BoardView(v) => v,
        other => panic!("expected a board view, got {:?}", other),
    }
}

/// Card titles per column, in listing order
#[allow(dead_code)]
pub fn layout<S: Transactional>(store: &mut S, board_id: &str) -> Vec<Vec<String>> {
    view(store, board_id)
        .columns
        .into_iter()
        .map(|c| c.cards.into_iter().map(|card| card.title).collect())
        .collect()
}

#[allow(dead_code)]
pub fn column_req(board_id: &str, name: &str) -> CreateColumn {
    CreateColumn {
        board_id: board_id.to_string(),
        name: name.to_string(),
        before_column_id: None,
        after_column_id: None,
    }
}

#[allow(dead_code)]
pub fn card_req(board_id: &str, column_id: &str, title: &str) -> CreateCard {
    CreateCard {
        board_id: board_id.to_string(),
        column_id: column_id.to_string(),
        title: title.to_string(),
        description: None,
        before_card_id: None,
        after_card_id: None,
    }
}
