//! lexoboard Store - SQLite persistence
//!
//! Provides:
//! - Connection setup (foreign keys, WAL, busy timeout)
//! - Embedded, checksummed schema migrations
//! - `SqliteStore`, implementing the ordered-list store contract with
//!   `BEGIN IMMEDIATE` transactions

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::{SqliteStore, SqliteUnitOfWork};
