//! Anchor resolution
//!
//! Clients position an entity relative to its neighbours ("put it before X",
//! "put it after Y") instead of sending keys. The resolver turns those anchors
//! into the pair of sibling keys that bound the new position and asks
//! [`midpoint`](crate::sort_key::midpoint) for a key between them.
//!
//! The snapshot passed in must be the full sibling set of the target parent,
//! already in listing order, and must not contain the entity being moved.

use crate::errors::{BoardError, Result};
use crate::model::Sibling;
use crate::sort_key;

/// Which anchor of a request is meant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorSide {
    /// The entity lands immediately before this sibling
    Before,
    /// The entity lands immediately after this sibling
    After,
}

impl AnchorSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorSide::Before => "before",
            AnchorSide::After => "after",
        }
    }
}

impl std::fmt::Display for AnchorSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys bounding the new position: `after` is the lower bound, `before` the upper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds<'a> {
    pub after: Option<&'a str>,
    pub before: Option<&'a str>,
}

fn locate<T: Sibling>(
    siblings: &[T],
    parent_id: &str,
    side: AnchorSide,
    anchor_id: &str,
) -> Result<usize> {
    siblings
        .iter()
        .position(|s| s.id() == anchor_id)
        .ok_or_else(|| BoardError::InvalidAnchor {
            side,
            anchor_id: anchor_id.to_string(),
            parent_id: parent_id.to_string(),
            reason: "not a sibling under the target parent".to_string(),
        })
}

/// Resolve anchors to bounding sibling keys
///
/// - no anchors: append after the last sibling
/// - `before` only: between it and its predecessor
/// - `after` only: between it and its successor
/// - both: `after` must be immediately followed by `before`
///
/// # Errors
///
/// `InvalidAnchor` if an anchor is not in `siblings`, or if both anchors are
/// given with other siblings between them.
pub fn resolve_bounds<'a, T: Sibling>(
    siblings: &'a [T],
    parent_id: &str,
    before_id: Option<&str>,
    after_id: Option<&str>,
) -> Result<Bounds<'a>> {
    let before_idx = before_id
        .map(|id| locate(siblings, parent_id, AnchorSide::Before, id))
        .transpose()?;
    let after_idx = after_id
        .map(|id| locate(siblings, parent_id, AnchorSide::After, id))
        .transpose()?;

    let key_at = move |i: usize| siblings[i].sort_key();

    let bounds = match (after_idx, before_idx) {
        (None, None) => Bounds {
            after: siblings.last().map(|s| s.sort_key()),
            before: None,
        },
        (None, Some(b)) => Bounds {
            after: b.checked_sub(1).map(key_at),
            before: Some(key_at(b)),
        },
        (Some(a), None) => Bounds {
            after: Some(key_at(a)),
            before: siblings.get(a + 1).map(|s| s.sort_key()),
        },
        (Some(a), Some(b)) => {
            if b > a + 1 {
                return Err(BoardError::InvalidAnchor {
                    side: AnchorSide::Before,
                    anchor_id: siblings[b].id().to_string(),
                    parent_id: parent_id.to_string(),
                    reason: format!("not adjacent to after anchor {}", siblings[a].id()),
                });
            }
            // Reversed or identical anchors fall through to midpoint's range check
            Bounds {
                after: Some(key_at(a)),
                before: Some(key_at(b)),
            }
        }
    };
    Ok(bounds)
}

/// Compute the sort key for an entity placed by anchors among `siblings`
///
/// # Errors
///
/// `InvalidAnchor` from [`resolve_bounds`]; `InvalidRange` or
/// `InvalidSortKey` from [`midpoint`](crate::sort_key::midpoint).
pub fn resolve_sort_key<T: Sibling>(
    siblings: &[T],
    parent_id: &str,
    before_id: Option<&str>,
    after_id: Option<&str>,
) -> Result<String> {
    let bounds = resolve_bounds(siblings, parent_id, before_id, after_id)?;
    sort_key::midpoint(bounds.after, bounds.before)
}
