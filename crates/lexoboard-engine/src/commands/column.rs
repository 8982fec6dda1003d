//! Column commands

use std::time::Instant;

use lexoboard_core::model::{now, Column};
use lexoboard_core::ops::{
    column_ops, CreateColumn, IdempotentOutcome, MoveColumn, OpStatus, Transactional,
};
use lexoboard_core::{log_op_end, log_op_error, log_op_start};
use lexoboard_core_types::RequestContext;

use super::{boundary_error, elapsed_ms, warn_long_key, Result};
use crate::config::EngineConfig;

/// Create a column, deduplicated by the request's idempotency token
///
/// # Errors
///
/// `ValidationError`, `NotFound`, `InvalidAnchor` or `InvalidRange` from the
/// core operation; `Persistence` on store failure.
pub fn column_create<S: Transactional>(
    store: &mut S,
    config: &EngineConfig,
    ctx: &RequestContext,
    req: &CreateColumn,
) -> Result<IdempotentOutcome<Column>> {
    let start = Instant::now();
    log_op_start!(
        "column_create",
        request_id = ctx.request_id.as_str(),
        board_id = req.board_id.as_str()
    );

    let guard = config.idempotency_guard();
    let result = store.atomically(|uow| {
        guard.run(
            uow,
            ctx.idempotency_token(),
            &req.scope(),
            OpStatus::Created,
            now(),
            |uow| column_ops::create_column(uow, req),
        )
    });

    let duration_ms = elapsed_ms(start);
    match result {
        Ok(outcome) => {
            let column = &outcome.value;
            if !outcome.replayed {
                warn_long_key(config, "column_create", &column.id, &column.sort_key);
            }
            log_op_end!(
                "column_create",
                duration_ms = duration_ms,
                column_id = column.id.as_str(),
                sort_key = column.sort_key.as_str(),
                replayed = outcome.replayed
            );
            Ok(outcome)
        }
        Err(e) => {
            let err = boundary_error("column_create", ctx, e);
            log_op_error!("column_create", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}

/// Reposition a column; concurrent moves are last-write-wins
///
/// # Errors
///
/// `NotFound`, `InvalidAnchor` or `InvalidRange` from the core operation;
/// `Persistence` on store failure.
pub fn column_move<S: Transactional>(
    store: &mut S,
    config: &EngineConfig,
    ctx: &RequestContext,
    req: &MoveColumn,
) -> Result<IdempotentOutcome<Column>> {
    let start = Instant::now();
    log_op_start!(
        "column_move",
        request_id = ctx.request_id.as_str(),
        board_id = req.board_id.as_str(),
        column_id = req.column_id.as_str()
    );

    let guard = config.idempotency_guard();
    let result = store.atomically(|uow| {
        guard.run(
            uow,
            ctx.idempotency_token(),
            &req.scope(),
            OpStatus::Ok,
            now(),
            |uow| column_ops::move_column(uow, req),
        )
    });

    let duration_ms = elapsed_ms(start);
    match result {
        Ok(outcome) => {
            let column = &outcome.value;
            if !outcome.replayed {
                warn_long_key(config, "column_move", &column.id, &column.sort_key);
            }
            log_op_end!(
                "column_move",
                duration_ms = duration_ms,
                column_id = column.id.as_str(),
                sort_key = column.sort_key.as_str(),
                replayed = outcome.replayed
            );
            Ok(outcome)
        }
        Err(e) => {
            let err = boundary_error("column_move", ctx, e);
            log_op_error!("column_move", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}

/// Delete a column with its cards
///
/// # Errors
///
/// `NotFound` if the column does not exist on the board.
pub fn column_delete<S: Transactional>(
    store: &mut S,
    ctx: &RequestContext,
    board_id: &str,
    column_id: &str,
) -> Result<()> {
    let start = Instant::now();
    log_op_start!(
        "column_delete",
        request_id = ctx.request_id.as_str(),
        board_id = board_id,
        column_id = column_id
    );

    let result = store.atomically(|uow| column_ops::delete_column(uow, board_id, column_id));

    let duration_ms = elapsed_ms(start);
    match result {
        Ok(()) => {
            log_op_end!("column_delete", duration_ms = duration_ms, column_id = column_id);
            Ok(())
        }
        Err(e) => {
            let err = boundary_error("column_delete", ctx, e);
            log_op_error!("column_delete", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}
