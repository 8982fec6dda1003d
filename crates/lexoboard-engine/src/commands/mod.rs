//! Command orchestration layer.
//!
//! Each command opens one store transaction, runs the core operation inside
//! it (behind the idempotency guard for creates and moves) and logs the
//! operation boundary. Errors leave as `ExError` carrying the operation name
//! and the request's correlation ids.

pub mod board;
pub mod card;
pub mod column;
pub mod engine_command;
pub mod maintenance;

use std::path::Path;

use lexoboard_core::errors::{BoardError, ExError};
use lexoboard_core_types::RequestContext;
use lexoboard_store::SqliteStore;

use crate::config::EngineConfig;

/// Result type for engine commands
pub type Result<T> = std::result::Result<T, ExError>;

/// Open (and migrate) the SQLite store with the configured busy timeout
///
/// # Errors
///
/// `Persistence` if the database cannot be opened or migrated.
pub fn open_store(path: &Path, config: &EngineConfig) -> Result<SqliteStore> {
    SqliteStore::open(path, config.busy_timeout())
}

/// Convert a core error into the boundary error for `op`
///
/// A store failure keeps the store call it came from as its `op`.
pub(crate) fn boundary_error(op: &'static str, ctx: &RequestContext, err: BoardError) -> ExError {
    let ex = ExError::from(err);
    let ex = if ex.op().is_some() { ex } else { ex.with_op(op) };
    let ex = ex.with_request_id(ctx.request_id.clone());
    match &ctx.trace_id {
        Some(trace_id) => ex.with_trace_id(trace_id.clone()),
        None => ex,
    }
}

/// Warn when a freshly written key has grown past the configured length
pub(crate) fn warn_long_key(
    config: &EngineConfig,
    op: &'static str,
    entity_id: &str,
    sort_key: &str,
) {
    if sort_key.len() > config.sort_key_warn_len {
        tracing::warn!(
            op = op,
            entity_id = entity_id,
            sort_key_len = sort_key.len(),
            limit = config.sort_key_warn_len,
            "sort key is getting long after repeated inserts between the same neighbours"
        );
    }
}

pub(crate) fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
