//! Housekeeping commands

use std::time::Instant;

use lexoboard_core::model::now;
use lexoboard_core::ops::Transactional;
use lexoboard_core::{log_op_end, log_op_error, log_op_start};
use lexoboard_core_types::RequestContext;

use super::{boundary_error, elapsed_ms, Result};
use crate::config::EngineConfig;

/// Delete idempotency entries older than the configured TTL
///
/// Returns the number of entries removed.
///
/// # Errors
///
/// `Persistence` on store failure.
pub fn idempotency_purge<S: Transactional>(
    store: &mut S,
    config: &EngineConfig,
    ctx: &RequestContext,
) -> Result<usize> {
    let start = Instant::now();
    log_op_start!("idempotency_purge", request_id = ctx.request_id.as_str());

    let guard = config.idempotency_guard();
    let result = store.atomically(|uow| guard.purge(uow, now()));

    let duration_ms = elapsed_ms(start);
    match result {
        Ok(removed) => {
            log_op_end!("idempotency_purge", duration_ms = duration_ms, removed = removed);
            Ok(removed)
        }
        Err(e) => {
            let err = boundary_error("idempotency_purge", ctx, e);
            log_op_error!("idempotency_purge", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}
