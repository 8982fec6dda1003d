//! Card commands

use std::time::Instant;

use lexoboard_core::model::{now, Card};
use lexoboard_core::ops::{
    card_ops, CreateCard, IdempotentOutcome, MoveCard, OpStatus, Transactional,
};
use lexoboard_core::{log_op_end, log_op_error, log_op_start};
use lexoboard_core_types::RequestContext;

use super::{boundary_error, elapsed_ms, warn_long_key, Result};
use crate::config::EngineConfig;

/// Create a card at version 0, deduplicated by the request's idempotency token
///
/// # Errors
///
/// `ValidationError`, `NotFound`, `InvalidAnchor` or `InvalidRange` from the
/// core operation; `Persistence` on store failure.
pub fn card_create<S: Transactional>(
    store: &mut S,
    config: &EngineConfig,
    ctx: &RequestContext,
    req: &CreateCard,
) -> Result<IdempotentOutcome<Card>> {
    let start = Instant::now();
    log_op_start!(
        "card_create",
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
            OpStatus::Created,
            now(),
            |uow| card_ops::create_card(uow, req),
        )
    });

    let duration_ms = elapsed_ms(start);
    match result {
        Ok(outcome) => {
            let card = &outcome.value;
            if !outcome.replayed {
                warn_long_key(config, "card_create", &card.id, &card.sort_key);
            }
            log_op_end!(
                "card_create",
                duration_ms = duration_ms,
                card_id = card.id.as_str(),
                sort_key = card.sort_key.as_str(),
                replayed = outcome.replayed
            );
            Ok(outcome)
        }
        Err(e) => {
            let err = boundary_error("card_create", ctx, e);
            log_op_error!("card_create", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}

/// Move a card within or across columns of its board
///
/// A replayed move returns the card as it was after the first move, not its
/// current state.
///
/// # Errors
///
/// `NotFound`, `InvalidMove`, `PreconditionFailed`, `InvalidAnchor` or
/// `InvalidRange` from the core operation; `Persistence` on store failure.
/// Only `PreconditionFailed` is worth retrying, after refetching the card.
pub fn card_move<S: Transactional>(
    store: &mut S,
    config: &EngineConfig,
    ctx: &RequestContext,
    req: &MoveCard,
) -> Result<IdempotentOutcome<Card>> {
    let start = Instant::now();
    log_op_start!(
        "card_move",
        request_id = ctx.request_id.as_str(),
        board_id = req.board_id.as_str(),
        card_id = req.card_id.as_str()
    );

    let guard = config.idempotency_guard();
    let result = store.atomically(|uow| {
        guard.run(
            uow,
            ctx.idempotency_token(),
            &req.scope(),
            OpStatus::Ok,
            now(),
            |uow| card_ops::move_card(uow, req),
        )
    });

    let duration_ms = elapsed_ms(start);
    match result {
        Ok(outcome) => {
            let card = &outcome.value;
            if !outcome.replayed {
                warn_long_key(config, "card_move", &card.id, &card.sort_key);
            }
            log_op_end!(
                "card_move",
                duration_ms = duration_ms,
                card_id = card.id.as_str(),
                column_id = card.column_id.as_str(),
                version = card.version,
                replayed = outcome.replayed
            );
            Ok(outcome)
        }
        Err(e) => {
            let err = boundary_error("card_move", ctx, e);
            log_op_error!(
                "card_move",
                err.clone(),
                duration_ms = duration_ms,
                retryable = err.kind().is_retryable()
            );
            Err(err)
        }
    }
}
