//! Board commands

use std::time::Instant;

use lexoboard_core::model::{now, Board, BoardView};
use lexoboard_core::ops::{board_ops, CreateBoard, IdempotentOutcome, OpStatus, Transactional};
use lexoboard_core::{log_op_end, log_op_error, log_op_start};
use lexoboard_core_types::RequestContext;

use super::{boundary_error, elapsed_ms, Result};
use crate::config::EngineConfig;

/// Create a board, deduplicated by the request's idempotency token
///
/// # Errors
///
/// `ValidationError` for a bad name; `Persistence` on store failure.
pub fn board_create<S: Transactional>(
    store: &mut S,
    config: &EngineConfig,
    ctx: &RequestContext,
    req: &CreateBoard,
) -> Result<IdempotentOutcome<Board>> {
    let start = Instant::now();
    log_op_start!(
        "board_create",
        request_id = ctx.request_id.as_str(),
        owner_id = req.owner_id.as_str()
    );

    let guard = config.idempotency_guard();
    let result = store.atomically(|uow| {
        guard.run(
            uow,
            ctx.idempotency_token(),
            &req.scope(),
            OpStatus::Created,
            now(),
            |uow| board_ops::create_board(uow, req),
        )
    });

    let duration_ms = elapsed_ms(start);
    match result {
        Ok(outcome) => {
            log_op_end!(
                "board_create",
                duration_ms = duration_ms,
                board_id = outcome.value.id.as_str(),
                replayed = outcome.replayed
            );
            Ok(outcome)
        }
        Err(e) => {
            let err = boundary_error("board_create", ctx, e);
            log_op_error!("board_create", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}

/// Load a board with its columns and cards in listing order
///
/// # Errors
///
/// `NotFound` if the board does not exist.
pub fn board_view<S: Transactional>(
    store: &mut S,
    ctx: &RequestContext,
    board_id: &str,
) -> Result<BoardView> {
    let start = Instant::now();
    log_op_start!(
        "board_view",
        request_id = ctx.request_id.as_str(),
        board_id = board_id
    );

    let result = store.atomically(|uow| board_ops::board_view(&*uow, board_id));

    let duration_ms = elapsed_ms(start);
    match result {
        Ok(view) => {
            log_op_end!(
                "board_view",
                duration_ms = duration_ms,
                columns = view.columns.len(),
                cards = view.card_count()
            );
            Ok(view)
        }
        Err(e) => {
            let err = boundary_error("board_view", ctx, e);
            log_op_error!("board_view", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}

/// Delete a board with all of its columns and cards
///
/// # Errors
///
/// `NotFound` if the board does not exist.
pub fn board_delete<S: Transactional>(
    store: &mut S,
    ctx: &RequestContext,
    board_id: &str,
) -> Result<()> {
    let start = Instant::now();
    log_op_start!(
        "board_delete",
        request_id = ctx.request_id.as_str(),
        board_id = board_id
    );

    let result = store.atomically(|uow| board_ops::delete_board(uow, board_id));

    let duration_ms = elapsed_ms(start);
    match result {
        Ok(()) => {
            log_op_end!("board_delete", duration_ms = duration_ms, board_id = board_id);
            Ok(())
        }
        Err(e) => {
            let err = boundary_error("board_delete", ctx, e);
            log_op_error!("board_delete", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}
