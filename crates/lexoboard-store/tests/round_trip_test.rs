// Integration tests: core operations against SQLite

use lexoboard_core::errors::BoardError;
use lexoboard_core::ops::{
    board_ops, card_ops, column_ops, CreateBoard, CreateCard, CreateColumn, MoveCard, MoveColumn,
};
use lexoboard_core::{Board, Card, Column, OrderedListStore, Transactional};
use lexoboard_store::SqliteStore;

fn setup_store() -> SqliteStore {
    SqliteStore::open_in_memory().expect("Failed to open store")
}

fn create_board(store: &mut SqliteStore) -> Board {
    store
        .atomically(|uow| {
            board_ops::create_board(
                uow,
                &CreateBoard {
                    name: "Sprint".to_string(),
                    description: Some("two weeks".to_string()),
                    owner_id: "owner-1".to_string(),
                },
            )
        })
        .unwrap()
}

fn append_column(store: &mut SqliteStore, board_id: &str, name: &str) -> Column {
    store
        .atomically(|uow| {
            column_ops::create_column(
                uow,
                &CreateColumn {
                    board_id: board_id.to_string(),
                    name: name.to_string(),
                    before_column_id: None,
                    after_column_id: None,
                },
            )
        })
        .unwrap()
}

fn append_card(store: &mut SqliteStore, board_id: &str, column_id: &str, title: &str) -> Card {
    store
        .atomically(|uow| {
            card_ops::create_card(
                uow,
                &CreateCard {
                    board_id: board_id.to_string(),
                    column_id: column_id.to_string(),
                    title: title.to_string(),
                    description: None,
                    before_card_id: None,
                    after_card_id: None,
                },
            )
        })
        .unwrap()
}

#[test]
fn test_created_entities_read_back_identically() {
    let mut store = setup_store();
    let board = create_board(&mut store);
    let column = append_column(&mut store, &board.id, "Todo");
    let card = append_card(&mut store, &board.id, &column.id, "Write docs");

    let (b, c, k) = store
        .atomically(|uow| {
            Ok((
                uow.get_board(&board.id)?,
                uow.get_column(&column.id)?,
                uow.get_card(&card.id)?,
            ))
        })
        .unwrap();

    assert_eq!(b, Some(board));
    assert_eq!(c, Some(column));
    assert_eq!(k, Some(card));
}

#[test]
fn test_card_move_persists_new_column_and_version() {
    let mut store = setup_store();
    let board = create_board(&mut store);
    let todo = append_column(&mut store, &board.id, "Todo");
    let done = append_column(&mut store, &board.id, "Done");
    let card = append_card(&mut store, &board.id, &todo.id, "Ship");

    let moved = store
        .atomically(|uow| {
            card_ops::move_card(
                uow,
                &MoveCard {
                    board_id: board.id.clone(),
                    card_id: card.id.clone(),
                    to_column_id: Some(done.id.clone()),
                    before_card_id: None,
                    after_card_id: None,
                    expected_version: Some(0),
                },
            )
        })
        .unwrap();

    let stored = store
        .atomically(|uow| uow.get_card(&card.id))
        .unwrap()
        .unwrap();
    assert_eq!(stored, moved);
    assert_eq!(stored.version, 1);
    assert_eq!(stored.column_id, done.id);
}

#[test]
fn test_stale_version_leaves_row_unchanged() {
    let mut store = setup_store();
    let board = create_board(&mut store);
    let todo = append_column(&mut store, &board.id, "Todo");
    let card = append_card(&mut store, &board.id, &todo.id, "Ship");

    let err = store
        .atomically(|uow| {
            card_ops::move_card(
                uow,
                &MoveCard {
                    board_id: board.id.clone(),
                    card_id: card.id.clone(),
                    to_column_id: None,
                    before_card_id: None,
                    after_card_id: None,
                    expected_version: Some(5),
                },
            )
        })
        .unwrap_err();

    assert!(matches!(err, BoardError::PreconditionFailed { actual_version: 0, .. }));
    let stored = store.atomically(|uow| uow.get_card(&card.id)).unwrap();
    assert_eq!(stored, Some(card));
}

#[test]
fn test_columns_list_in_key_order_after_move() {
    let mut store = setup_store();
    let board = create_board(&mut store);
    let a = append_column(&mut store, &board.id, "A");
    let b = append_column(&mut store, &board.id, "B");

    store
        .atomically(|uow| {
            column_ops::move_column(
                uow,
                &MoveColumn {
                    board_id: board.id.clone(),
                    column_id: b.id.clone(),
                    before_column_id: Some(a.id.clone()),
                    after_column_id: None,
                },
            )
        })
        .unwrap();

    let names: Vec<String> = store
        .atomically(|uow| uow.list_columns(&board.id))
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn test_delete_board_leaves_no_orphans() {
    let mut store = setup_store();
    let board = create_board(&mut store);
    let todo = append_column(&mut store, &board.id, "Todo");
    append_card(&mut store, &board.id, &todo.id, "A");
    append_card(&mut store, &board.id, &todo.id, "B");

    store
        .atomically(|uow| board_ops::delete_board(uow, &board.id))
        .unwrap();

    let conn = store.connection();
    for table in ["columns", "cards"] {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0, "orphans left in {}", table);
    }
}

#[test]
fn test_delete_column_cascades_to_cards() {
    let mut store = setup_store();
    let board = create_board(&mut store);
    let todo = append_column(&mut store, &board.id, "Todo");
    let keep = append_column(&mut store, &board.id, "Keep");
    append_card(&mut store, &board.id, &todo.id, "Gone");
    let kept = append_card(&mut store, &board.id, &keep.id, "Stays");

    store
        .atomically(|uow| column_ops::delete_column(uow, &board.id, &todo.id))
        .unwrap();

    let view = store
        .atomically(|uow| board_ops::board_view(uow, &board.id))
        .unwrap();
    assert_eq!(view.columns.len(), 1);
    assert_eq!(view.columns[0].cards, vec![kept]);
}
