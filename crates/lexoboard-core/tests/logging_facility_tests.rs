#![allow(clippy::unwrap_used, clippy::expect_used)]

use lexoboard_core::errors::{BoardError, ExErrorKind};
use lexoboard_core::logging_facility::test_capture::init_test_capture;
use lexoboard_core::{log_op_end, log_op_error, log_op_start};
use lexoboard_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, board_id = "b1");

    let events = capture.events_for(op_name, EVENT_START);
    assert_eq!(events.len(), 1, "Should have exactly one start event");
    assert_eq!(events[0].field("board_id"), Some("b1"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for(op_name, EVENT_END);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = BoardError::PreconditionFailed {
        card_id: "c1".to_string(),
        expected_version: 0,
        actual_version: 1,
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for(op_name, EVENT_END_ERROR);
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].field("err_kind"),
        Some(format!("{:?}", ExErrorKind::PreconditionFailed).as_str())
    );
    assert_eq!(events[0].field("err_code"), Some("ERR_PRECONDITION_FAILED"));
}

#[test]
fn test_capture_counts_by_predicate() {
    let capture = init_test_capture();
    let op_name = "test_capture_counts_unique_4";

    log_op_start!(op_name);
    log_op_end!(op_name, duration_ms = 1);

    let count = capture.count_events(|e| e.op.as_deref() == Some(op_name));
    assert_eq!(count, 2);
    capture.assert_event_exists(op_name, EVENT_END);
}
