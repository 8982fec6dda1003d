pub mod actor;
pub mod board;
pub mod card;
pub mod column;

pub use actor::{Actor, Role};
pub use board::{Board, BoardView, ColumnView};
pub use card::Card;
pub use column::Column;

use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to whole milliseconds
///
/// Persisted timestamps carry millisecond precision, so entities are stamped
/// with the truncated value to make a returned entity equal its re-read copy.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A member of an ordered sibling set
pub trait Sibling {
    fn id(&self) -> &str;
    fn sort_key(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
}

/// Sort siblings into listing order: `(sort_key, created_at, id)` ascending
///
/// Ids are unique, so the order is total even if two siblings ever share a
/// key and a creation instant.
pub fn order_siblings<T: Sibling>(siblings: &mut [T]) {
    siblings.sort_by(|a, b| {
        a.sort_key()
            .cmp(b.sort_key())
            .then_with(|| a.created_at().cmp(&b.created_at()))
            .then_with(|| a.id().cmp(b.id()))
    });
}
