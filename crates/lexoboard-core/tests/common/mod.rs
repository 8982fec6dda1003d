use lexoboard_core::ops::{board_ops, card_ops, column_ops, CreateBoard, CreateCard, CreateColumn};
use lexoboard_core::{Board, Card, Column, MemoryStore, OrderedListStore};

/// Create a new empty MemoryStore for testing
#[allow(dead_code)]
pub fn new_store() -> MemoryStore {
    MemoryStore::new()
}

/// Create a board owned by `owner-1`
#[allow(dead_code)]
pub fn create_test_board(store: &mut MemoryStore, name: &str) -> Board {
    board_ops::create_board(
        store,
        &CreateBoard {
            name: name.to_string(),
            description: None,
            owner_id: "owner-1".to_string(),
        },
    )
    .expect("Should create board")
}

/// Append a column to the end of a board
#[allow(dead_code)]
pub fn append_column(store: &mut MemoryStore, board_id: &str, name: &str) -> Column {
    column_ops::create_column(
        store,
        &CreateColumn {
            board_id: board_id.to_string(),
            name: name.to_string(),
            before_column_id: None,
            after_column_id: None,
        },
    )
    .expect("Should create column")
}

/// Append a card to the end of a column
#[allow(dead_code)]
pub fn append_card(store: &mut MemoryStore, board_id: &str, column_id: &str, title: &str) -> Card {
    card_ops::create_card(
        store,
        &CreateCard {
            board_id: board_id.to_string(),
            column_id: column_id.to_string(),
            title: title.to_string(),
            description: None,
            before_card_id: None,
            after_card_id: None,
        },
    )
    .expect("Should create card")
}

/// Card titles of a column in listing order
#[allow(dead_code)]
pub fn card_titles(store: &MemoryStore, column_id: &str) -> Vec<String> {
    store
        .list_cards(column_id)
        .expect("Should list cards")
        .into_iter()
        .map(|c| c.title)
        .collect()
}

/// Column names of a board in listing order
#[allow(dead_code)]
pub fn column_names(store: &MemoryStore, board_id: &str) -> Vec<String> {
    store
        .list_columns(board_id)
        .expect("Should list columns")
        .into_iter()
        .map(|c| c.name)
        .collect()
}
