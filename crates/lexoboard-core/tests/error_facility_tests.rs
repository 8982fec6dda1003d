#![allow(clippy::unwrap_used, clippy::expect_used)]

use lexoboard_core::errors::{BoardError, ExError, ExErrorKind};
use lexoboard_core::AnchorSide;
use lexoboard_core_types::RequestId;

#[test]
fn test_every_domain_error_maps_to_a_kind() {
    let cases = vec![
        (
            BoardError::InvalidSortKey {
                key: "A".to_string(),
                reason: "upper case".to_string(),
            },
            ExErrorKind::InvalidSortKey,
        ),
        (
            BoardError::InvalidRange {
                left: Some("m".to_string()),
                right: Some("m".to_string()),
                reason: "equal".to_string(),
            },
            ExErrorKind::InvalidRange,
        ),
        (
            BoardError::InvalidMove {
                card_id: "c1".to_string(),
                reason: "other board".to_string(),
            },
            ExErrorKind::InvalidMove,
        ),
        (
            BoardError::PreconditionFailed {
                card_id: "c1".to_string(),
                expected_version: 1,
                actual_version: 2,
            },
            ExErrorKind::PreconditionFailed,
        ),
        (
            BoardError::ColumnNotFound {
                column_id: "col".to_string(),
                board_id: "b".to_string(),
            },
            ExErrorKind::NotFound,
        ),
        (
            BoardError::BoardNotFound {
                board_id: "b".to_string(),
            },
            ExErrorKind::NotFound,
        ),
        (
            BoardError::Validation {
                field: "title".to_string(),
                reason: "blank".to_string(),
            },
            ExErrorKind::ValidationError,
        ),
        (
            BoardError::Forbidden {
                actor_id: "u".to_string(),
                role: "reader".to_string(),
            },
            ExErrorKind::Forbidden,
        ),
    ];

    for (err, kind) in cases {
        let ex: ExError = err.clone().into();
        assert_eq!(ex.kind(), kind, "wrong kind for {:?}", err);
        assert_eq!(ex.message(), err.to_string());
    }
}

#[test]
fn test_precondition_failed_carries_card_id_and_versions() {
    let ex: ExError = BoardError::PreconditionFailed {
        card_id: "card-7".to_string(),
        expected_version: 3,
        actual_version: 4,
    }
    .into();

    assert_eq!(ex.code(), "ERR_PRECONDITION_FAILED");
    assert_eq!(ex.entity_id(), Some("card-7"));
    assert!(ex.message().contains('3') && ex.message().contains('4'));
    assert!(ex.kind().is_retryable());
}

#[test]
fn test_request_id_is_rendered() {
    let request_id = RequestId::from_string("req-42".to_string());
    let ex: ExError = BoardError::InvalidAnchor {
        side: AnchorSide::After,
        anchor_id: "c9".to_string(),
        parent_id: "col-1".to_string(),
        reason: "not a sibling under the target parent".to_string(),
    }
    .into();
    let rendered = ex.with_request_id(request_id).with_op("card_move").to_string();

    assert!(rendered.starts_with("[ERR_INVALID_ANCHOR] in operation 'card_move'"));
    assert!(rendered.contains("(anchor: after)"));
    assert!(rendered.contains("(request_id: req-42)"));
}
