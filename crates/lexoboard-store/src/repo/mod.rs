//! Repository layer persisting boards, columns and cards to SQLite

pub mod sqlite_repo;

pub use sqlite_repo::{SqliteStore, SqliteUnitOfWork};
