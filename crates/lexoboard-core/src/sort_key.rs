//! Fractional sort keys over the alphabet `[0-9a-z]`
//!
//! A sort key is a non-empty string whose byte-wise lexicographic order is the
//! display order of its siblings. New keys are minted strictly between two
//! neighbours with [`midpoint`], so an insertion never rewrites another
//! sibling's key.
//!
//! Keys are never rebalanced. Repeated insertion at the same boundary grows the
//! key by roughly one symbol every five insertions.

use crate::errors::{BoardError, Result};

/// The 36 key symbols in rank order
pub const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const MIN_RANK: u8 = 0;
const MAX_RANK: u8 = 35;

/// Rank of a key symbol, or `None` if the byte is not in the alphabet
pub fn rank(symbol: u8) -> Option<u8> {
    match symbol {
        b'0'..=b'9' => Some(symbol - b'0'),
        b'a'..=b'z' => Some(symbol - b'a' + 10),
        _ => None,
    }
}

fn symbol(rank: u8) -> char {
    ALPHABET[rank as usize] as char
}

/// Check that `key` is a well-formed sort key
///
/// # Errors
///
/// Returns `InvalidSortKey` for an empty key or a symbol outside `[0-9a-z]`.
pub fn validate(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(BoardError::InvalidSortKey {
            key: key.to_string(),
            reason: "sort key cannot be empty".to_string(),
        });
    }
    if let Some((index, ch)) = key
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii() || rank(*ch as u8).is_none())
    {
        return Err(BoardError::InvalidSortKey {
            key: key.to_string(),
            reason: format!("symbol {:?} at offset {} is outside [0-9a-z]", ch, index),
        });
    }
    Ok(())
}

/// Compute a key strictly between `left` and `right`
///
/// An absent `left` is the open lower end, an absent `right` the open upper
/// end. At each position the ranks of both bounds are compared (rank 0 past
/// the end of `left`, rank 35 past the end of `right`): when they are at least
/// two apart the middle symbol is emitted and the key is complete, otherwise
/// the left symbol is copied and the walk borrows one more position.
///
/// ```
/// use lexoboard_core::sort_key::midpoint;
///
/// assert_eq!(midpoint(None, None).unwrap(), "h");
/// assert_eq!(midpoint(Some("h"), None).unwrap(), "q");
/// assert_eq!(midpoint(None, Some("h")).unwrap(), "8");
/// ```
///
/// # Errors
///
/// - `InvalidSortKey` if a bound is empty or contains a foreign symbol
/// - `InvalidRange` if `left >= right`, or if `right` is `left` followed only
///   by `'0'` symbols (no key exists between them)
pub fn midpoint(left: Option<&str>, right: Option<&str>) -> Result<String> {
    if let Some(l) = left {
        validate(l)?;
    }
    if let Some(r) = right {
        validate(r)?;
    }

    let range_error = |reason: &str| BoardError::InvalidRange {
        left: left.map(str::to_string),
        right: right.map(str::to_string),
        reason: reason.to_string(),
    };

    let lower = left.unwrap_or("").as_bytes();
    if let Some(r) = right {
        if let Some(l) = left {
            if l >= r {
                return Err(range_error("left bound must sort before right bound"));
            }
        }
        let upper = r.as_bytes();
        if upper.starts_with(lower) && upper[lower.len()..].iter().all(|b| *b == b'0') {
            return Err(range_error("no key exists strictly between the bounds"));
        }
    }
    let upper = right.unwrap_or("").as_bytes();

    let mut out = String::with_capacity(lower.len().max(upper.len()) + 1);
    let mut i = 0;
    loop {
        let l = lower.get(i).and_then(|b| rank(*b)).unwrap_or(MIN_RANK);
        let r = upper.get(i).and_then(|b| rank(*b)).unwrap_or(MAX_RANK);
        if r >= l + 2 {
            out.push(symbol((l + r) / 2));
            return Ok(out);
        }
        out.push(symbol(l));
        i += 1;
    }
}
