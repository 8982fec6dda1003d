//! Names shared by log producers and log consumers
//!
//! Every engine operation emits one `start` event and then exactly one of
//! `end` or `end_error`, each tagged with the operation name under `op`.

/// Field naming the operation (`card_move`, `column_create`, ...)
pub const FIELD_OP: &str = "op";
/// Field holding one of the lifecycle event names below
pub const FIELD_EVENT: &str = "event";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

/// Whether `event` is one of the lifecycle event names
pub fn is_lifecycle_event(event: &str) -> bool {
    matches!(event, EVENT_START | EVENT_END | EVENT_END_ERROR)
}
