//! Operation lifecycle macros
//!
//! Each engine operation logs `start` on entry and exactly one of `end` or
//! `end_error` on exit. All three events carry `component` (the calling
//! module) and `op`; extra `key = value` fields are passed through to
//! `tracing` unchanged.

/// Shared body of the lifecycle macros; not part of the public surface
#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log that an operation started
///
/// ```
/// # use lexoboard_core::log_op_start;
/// log_op_start!("card_move");
/// log_op_start!("card_move", card_id = "c1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Log that an operation finished; `duration_ms` is required
///
/// ```
/// # use lexoboard_core::log_op_end;
/// log_op_end!("card_move", duration_ms = 3);
/// log_op_end!("card_move", duration_ms = 3, version = 2u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log that an operation failed, with the error's kind and stable code
///
/// The error may be anything convertible into `ExError`, `BoardError`
/// included.
///
/// ```
/// # use lexoboard_core::{log_op_error, errors::BoardError};
/// let err = BoardError::CardNotFound { card_id: "c1".to_string() };
/// log_op_error!("card_move", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
