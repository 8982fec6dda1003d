//! Idempotent writes through the engine
//!
//! The cache lives in the database, so a retry answered by a second process
//! (modelled here by reopening the file) replays the first response.

mod common;

use std::thread;
use std::time::Duration;

use common::{card_req, column_req, create_board, create_card, create_column, layout, setup_sqlite};
use lexoboard_core::errors::ExErrorKind;
use lexoboard_core::ops::{MoveCard, OpStatus, Transactional};
use lexoboard_core::MemoryStore;
use lexoboard_core_types::RequestContext;
use lexoboard_engine::commands::card::{card_create, card_move};
use lexoboard_engine::commands::column::column_create;
use lexoboard_engine::commands::maintenance::idempotency_purge;
use lexoboard_engine::commands::open_store;
use lexoboard_engine::EngineConfig;

fn retried_create_runs_once<S: Transactional>(store: &mut S) {
    let config = EngineConfig::default();
    let board = create_board(store, "Sprint");
    let todo = create_column(store, &board.id, "Todo");
    let req = card_req(&board.id, &todo.id, "Once");

    let ctx = RequestContext::new().with_idempotency_token("tok-create");
    let first = card_create(store, &config, &ctx, &req).unwrap();
    let second = card_create(store, &config, &ctx, &req).unwrap();

    assert_eq!(first.status, OpStatus::Created);
    assert_eq!(second.status, OpStatus::Created);
    assert_eq!(first.body, second.body);
    assert!(second.replayed);
    assert_eq!(layout(store, &board.id), vec![vec!["Once"]]);
}

fn empty_token_is_passthrough<S: Transactional>(store: &mut S) {
    let config = EngineConfig::default();
    let board = create_board(store, "Sprint");
    let todo = create_column(store, &board.id, "Todo");
    let req = card_req(&board.id, &todo.id, "Twice");

    let ctx = RequestContext::new().with_idempotency_token("");
    card_create(store, &config, &ctx, &req).unwrap();
    let second = card_create(store, &config, &ctx, &req).unwrap();

    assert!(!second.replayed);
    assert_eq!(layout(store, &board.id), vec![vec!["Twice", "Twice"]]);
}

fn token_is_scoped_to_operation<S: Transactional>(store: &mut S) {
    let config = EngineConfig::default();
    let board = create_board(store, "Sprint");
    let todo = create_column(store, &board.id, "Todo");

    let ctx = RequestContext::new().with_idempotency_token("shared");
    let column = column_create(store, &config, &ctx, &column_req(&board.id, "Doing")).unwrap();
    let card = card_create(store, &config, &ctx, &card_req(&board.id, &todo.id, "A")).unwrap();

    assert!(!column.replayed);
    assert!(!card.replayed);
    assert_eq!(layout(store, &board.id), vec![vec!["A"], vec![]]);
}

fn failed_write_is_not_cached<S: Transactional>(store: &mut S) {
    let config = EngineConfig::default();
    let board = create_board(store, "Sprint");
    let todo = create_column(store, &board.id, "Todo");
    let card = create_card(store, &board.id, &todo.id, "A");
    let ctx = RequestContext::new().with_idempotency_token("tok-move");

    let stale = MoveCard {
        board_id: board.id.clone(),
        card_id: card.id.clone(),
        to_column_id: None,
        before_card_id: None,
        after_card_id: None,
        expected_version: Some(7),
    };
    let err = card_move(store, &config, &ctx, &stale).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::PreconditionFailed);

    let fixed = MoveCard {
        expected_version: Some(0),
        ..stale
    };
    let outcome = card_move(store, &config, &ctx, &fixed).unwrap();
    assert!(!outcome.replayed);
    assert_eq!(outcome.value.version, 1);
}

#[test]
fn test_retried_create_runs_once_memory() {
    retried_create_runs_once(&mut MemoryStore::new());
}

#[test]
fn test_retried_create_runs_once_sqlite() {
    let (_dir, mut store) = setup_sqlite();
    retried_create_runs_once(&mut store);
}

#[test]
fn test_empty_token_is_passthrough_memory() {
    empty_token_is_passthrough(&mut MemoryStore::new());
}

#[test]
fn test_empty_token_is_passthrough_sqlite() {
    let (_dir, mut store) = setup_sqlite();
    empty_token_is_passthrough(&mut store);
}

#[test]
fn test_token_is_scoped_to_operation_memory() {
    token_is_scoped_to_operation(&mut MemoryStore::new());
}

#[test]
fn test_token_is_scoped_to_operation_sqlite() {
    let (_dir, mut store) = setup_sqlite();
    token_is_scoped_to_operation(&mut store);
}

#[test]
fn test_failed_write_is_not_cached_memory() {
    failed_write_is_not_cached(&mut MemoryStore::new());
}

#[test]
fn test_failed_write_is_not_cached_sqlite() {
    let (_dir, mut store) = setup_sqlite();
    failed_write_is_not_cached(&mut store);
}

#[test]
fn test_replay_survives_reopening_database() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("shared.db");
    let config = EngineConfig::default();

    let (board_id, column_id, first_body) = {
        let mut store = open_store(&path, &config).unwrap();
        let board = create_board(&mut store, "Sprint");
        let todo = create_column(&mut store, &board.id, "Todo");
        let ctx = RequestContext::new().with_idempotency_token("tok-reopen");
        let first = card_create(&mut store, &config, &ctx, &card_req(&board.id, &todo.id, "A"))
            .unwrap();
        (board.id, todo.id, first.body)
    };

    let mut store = open_store(&path, &config).unwrap();
    let ctx = RequestContext::new().with_idempotency_token("tok-reopen");
    let second = card_create(&mut store, &config, &ctx, &card_req(&board_id, &column_id, "A"))
        .unwrap();

    assert!(second.replayed);
    assert_eq!(second.body, first_body);
    assert_eq!(layout(&mut store, &board_id), vec![vec!["A"]]);
}

#[test]
fn test_zero_ttl_never_replays_and_purge_clears_ledger() {
    let (_dir, mut store) = setup_sqlite();
    let board = create_board(&mut store, "Sprint");
    let todo = create_column(&mut store, &board.id, "Todo");
    let req = card_req(&board.id, &todo.id, "A");
    let ctx = RequestContext::new().with_idempotency_token("tok-ttl");

    let no_ttl = EngineConfig {
        idempotency_ttl_secs: 0,
        ..EngineConfig::default()
    };
    card_create(&mut store, &no_ttl, &ctx, &req).unwrap();
    let second = card_create(&mut store, &no_ttl, &ctx, &req).unwrap();
    assert!(!second.replayed);
    assert_eq!(layout(&mut store, &board.id), vec![vec!["A", "A"]]);

    // Entries are stamped in whole milliseconds
    thread::sleep(Duration::from_millis(5));
    let removed = idempotency_purge(&mut store, &no_ttl, &RequestContext::new()).unwrap();
    assert_eq!(removed, 1);

    let again = idempotency_purge(&mut store, &no_ttl, &RequestContext::new()).unwrap();
    assert_eq!(again, 0);
}

#[test]
fn test_purge_keeps_live_entries() {
    let (_dir, mut store) = setup_sqlite();
    let board = create_board(&mut store, "Sprint");
    let todo = create_column(&mut store, &board.id, "Todo");
    let config = EngineConfig::default();
    let ctx = RequestContext::new().with_idempotency_token("tok-live");
    card_create(&mut store, &config, &ctx, &card_req(&board.id, &todo.id, "A")).unwrap();

    let removed = idempotency_purge(&mut store, &config, &RequestContext::new()).unwrap();
    assert_eq!(removed, 0);

    let replay =
        card_create(&mut store, &config, &ctx, &card_req(&board.id, &todo.id, "A")).unwrap();
    assert!(replay.replayed);
}
