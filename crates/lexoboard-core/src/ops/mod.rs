pub mod board_ops;
pub mod card_ops;
pub mod column_ops;
pub mod idempotency;
pub mod memory;
pub mod store;

pub use board_ops::CreateBoard;
pub use card_ops::{CreateCard, MoveCard};
pub use column_ops::{CreateColumn, MoveColumn};
pub use idempotency::{
    CachedResponse, IdempotencyGuard, IdempotencyKey, IdempotentOutcome, OpStatus,
};
pub use memory::MemoryStore;
pub use store::{IdempotencyLedger, OrderedListStore, Transactional, UnitOfWork};
