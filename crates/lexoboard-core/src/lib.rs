//! lexoboard Core - ordering & move engine
//!
//! This crate provides the storage-independent half of the engine:
//! - Board, Column and Card models with deterministic sibling ordering
//! - Fractional sort keys over a 36-symbol alphabet (`sort_key`)
//! - Anchor resolution from before/after sibling ids to concrete keys (`position`)
//! - Create/move coordination for columns and cards with optimistic
//!   concurrency on card versions (`ops`)
//! - The idempotent-write guard and the ordered-list store contract
//!
//! Persistence lives in `lexoboard-store`; transaction and logging wiring
//! lives in `lexoboard-engine`.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod position;
pub mod rules;
pub mod sort_key;

// Re-exported so the logging macros resolve schema constants through `$crate`
pub use lexoboard_core_types as core_types;

// Re-export commonly used types
pub use errors::{BoardError, ExError, ExErrorKind, Result};
pub use model::{Actor, Board, Card, Column, Role};
pub use ops::{MemoryStore, OrderedListStore, Transactional, UnitOfWork};
pub use position::AnchorSide;
