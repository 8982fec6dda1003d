//! Schema migrations
//!
//! SQL files under `migrations/` are embedded at build time and applied in
//! order. Each applied step is recorded in `schema_version` with the
//! checksum of its SQL; a step whose text changed after being applied is
//! refused.

mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
