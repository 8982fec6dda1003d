//! Property tests for sort key generation
use lexoboard_core::errors::BoardError;
use lexoboard_core::sort_key::midpoint;
use proptest::prelude::*;

fn gapless(left: &str, right: &str) -> bool {
    right.starts_with(left) && right[left.len()..].bytes().all(|b| b == b'0')
}

proptest! {
    #[test]
    fn prop_midpoint_is_strictly_between(a in "[0-9a-z]{1,8}", b in "[0-9a-z]{1,8}") {
        let (left, right) = if a < b { (a, b) } else { (b, a) };
        prop_assume!(left != right);
        prop_assume!(!gapless(&left, &right));

        let mid = midpoint(Some(&left), Some(&right)).unwrap();
        prop_assert!(left < mid, "{} !< {}", left, mid);
        prop_assert!(mid < right, "{} !< {}", mid, right);
    }

    #[test]
    fn prop_open_bounds_stay_in_range(key in "[0-9a-z]{1,8}") {
        let above = midpoint(Some(&key), None).unwrap();
        prop_assert!(above > key);

        if !gapless("", &key) {
            let below = midpoint(None, Some(&key)).unwrap();
            prop_assert!(below < key);
        }
    }

    #[test]
    fn prop_reversed_bounds_are_rejected(a in "[0-9a-z]{1,6}", b in "[0-9a-z]{1,6}") {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let result = midpoint(Some(&high), Some(&low));
        prop_assert!(matches!(result, Err(BoardError::InvalidRange { .. })), "expected InvalidRange error");
    }
}

#[test]
fn test_midpoint_of_equal_keys_is_invalid_range() {
    assert!(matches!(
        midpoint(Some("x"), Some("x")),
        Err(BoardError::InvalidRange { .. })
    ));
}
