//! lexoboard Engine - Orchestration layer
//!
//! Runs the core create/move operations inside one store transaction each,
//! wraps writes in the idempotency guard, and owns the lifecycle logging
//! (`start` / `end` / `end_error`) of every operation.

pub mod commands;
pub mod config;

pub use config::EngineConfig;
